use crate::error::*;
use async_trait::async_trait;
use strum::IntoEnumIterator as _;

pub use reqwest::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Source {
    #[strum(serialize = "boj")]
    Boj,
}

impl Source {
    /// Pick the first source whose name starts with `prefix` (`b` selects `boj`).
    pub fn guess(prefix: &str) -> Result<Self> {
        Self::iter()
            .find(|s| !prefix.is_empty() && s.to_string().starts_with(prefix))
            .ok_or_else(|| {
                let available = Self::iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Error::InvalidSource(prefix.to_owned(), available)
            })
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SampleTestcase {
    /// 1-based
    pub ord: u32,
    pub input: String,
    pub expected: String,
}

impl SampleTestcase {
    pub fn new(ord: u32, input: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            ord,
            input: input.into(),
            expected: expected.into(),
        }
    }
}

#[async_trait]
pub trait Client {
    fn source(&self) -> Source;

    fn problem_url(&self, problem_id: &str) -> Result<Url>;

    async fn fetch_testcases(&self, problem_id: &str) -> Result<Vec<SampleTestcase>>;
}
