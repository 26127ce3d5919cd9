use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::*;

pub fn parse_url(url: impl AsRef<str>) -> Result<Url> {
    match Url::parse(url.as_ref()) {
        Ok(url) => Ok(url),
        Err(e) => Err(Error::InvalidSyntaxUrl {
            url: url.as_ref().to_owned(),
            source: e,
        }),
    }
}

pub fn selector_must_parsed(sel: &'static str) -> Selector {
    Selector::parse(sel).expect("Failed to parse  `&'static str`  selector")
}

pub async fn fetch_html(c: &Client, url: Url) -> Result<Html> {
    let url_str = url.to_string();
    let resp = c.get(url).send().await?;

    let status = resp.status();
    if status != StatusCode::OK {
        return Err(Error::UnexpectedResponseCode {
            got: status,
            expected: StatusCode::OK,
            requested_url: url_str,
        });
    }

    let html = resp.text().await?;
    Ok(Html::parse_document(&html))
}

/// All descendant text, trimmed, with `\r` removed.
pub fn sample_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().replace('\r', "")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sample_text_is_trimmed() {
        let html = Html::parse_fragment("<pre id=\"x\">\r\n1 2\r\n3 4\r\n  </pre>");
        let sel = selector_must_parsed("#x");
        let el = html.select(&sel).next().unwrap();
        assert_eq!(sample_text(el), "1 2\n3 4");
    }

    #[test]
    fn invalid_url() {
        assert!(matches!(
            parse_url("not a url"),
            Err(Error::InvalidSyntaxUrl { .. })
        ));
    }
}
