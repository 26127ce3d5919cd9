//! Baekjoon Online Judge (acmicpc.net)

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::{error::*, model::*, util};

pub const PROBLEM_URL_PREFIX: &str = "https://acmicpc.net/problem/";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

static SEL_SAMPLE_INPUT: Lazy<Selector> =
    Lazy::new(|| util::selector_must_parsed(r#"[id^="sample-input-"]"#));
static SEL_SAMPLE_OUTPUT: Lazy<Selector> =
    Lazy::new(|| util::selector_must_parsed(r#"[id^="sample-output-"]"#));

pub struct BojClient {
    http: reqwest::Client,
}

impl BojClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .gzip(true)
                .build()
                .unwrap(),
        }
    }

    /// Pair up sample inputs and outputs in document order.
    /// Unpaired trailing elements are dropped.
    pub fn parse_sample_testcases(html: &Html) -> Vec<SampleTestcase> {
        let inputs: Vec<_> = html.select(&SEL_SAMPLE_INPUT).map(util::sample_text).collect();
        let outputs: Vec<_> = html.select(&SEL_SAMPLE_OUTPUT).map(util::sample_text).collect();
        if inputs.len() != outputs.len() {
            log::warn!(
                "Found {} sample inputs but {} sample outputs",
                inputs.len(),
                outputs.len()
            );
        }

        inputs
            .into_iter()
            .zip(outputs)
            .zip(1..)
            .map(|((input, expected), ord)| SampleTestcase::new(ord, input, expected))
            .collect()
    }
}

impl Default for BojClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Client for BojClient {
    fn source(&self) -> Source {
        Source::Boj
    }

    fn problem_url(&self, problem_id: &str) -> Result<Url> {
        util::parse_url(format!("{}{}", PROBLEM_URL_PREFIX, problem_id))
    }

    async fn fetch_testcases(&self, problem_id: &str) -> Result<Vec<SampleTestcase>> {
        let url = self.problem_url(problem_id)?;
        let html = util::fetch_html(&self.http, url.clone()).await?;
        let testcases = Self::parse_sample_testcases(&html);
        if testcases.is_empty() {
            return Err(Error::NoSampleTestcase(url));
        }
        Ok(testcases)
    }
}
