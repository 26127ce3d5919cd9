use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use rust_embed::RustEmbed;
use serde::Deserialize;

pub const APP_NAME: &str = "solve";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub compile: CompileRules,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    #[serde(default = "RunConfig::default_testcase_dir")]
    pub testcase_dir: PathBuf,

    /// Seconds
    #[serde(default = "RunConfig::default_time_limit")]
    pub time_limit: u64,
}

/// Compile rules keyed by file extension (without the leading dot).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CompileRules(BTreeMap<String, CompileRule>);

/// A build command run without a shell.
///
/// Each element of `args` may contain `#{source}`, `#{artifact}`,
/// `#{sourceDir}` and `#{sourceStem}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompileRule {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,

    /// When set, the artifact is written as this line followed by the source
    /// and marked executable before `program` runs.
    #[serde(default)]
    pub shebang: Option<String>,
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            testcase_dir: Self::default_testcase_dir(),
            time_limit: Self::default_time_limit(),
        }
    }
}

impl RunConfig {
    fn default_testcase_dir() -> PathBuf {
        PathBuf::from("testcase")
    }

    fn default_time_limit() -> u64 {
        3
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit)
    }
}

impl CompileRules {
    pub fn new(rules: impl IntoIterator<Item = (String, CompileRule)>) -> Self {
        Self(rules.into_iter().collect())
    }

    pub fn find(&self, ext: &str) -> Option<&CompileRule> {
        self.0.get(ext)
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Rules in `other` replace rules for the same extension.
    pub fn overlay(&mut self, other: CompileRules) {
        self.0.extend(other.0);
    }
}

impl CompileRule {
    pub fn new<S: Into<String>>(program: S, args: impl IntoIterator<Item = S>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            shebang: None,
        }
    }

    pub fn shebang(mut self, line: impl Into<String>) -> Self {
        self.shebang = Some(line.into());
        self
    }
}

impl Config {
    pub const FILENAME: &str = "solve.toml";

    pub fn builtin_toml() -> String {
        let file = Asset::get(Self::FILENAME).unwrap();
        std::str::from_utf8(file.data.as_ref()).unwrap().to_owned()
    }

    pub fn builtin() -> Self {
        Self::from_toml(&Self::builtin_toml()).expect("Built-in config must be valid")
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load a config file on top of the built-in compile rules.
    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let user = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;

        let mut cfg = Self::builtin();
        cfg.run = user.run;
        cfg.compile.overlay(user.compile);
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file in ancestor dirs, including `cur_dir` itself.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> Option<PathBuf> {
        cur_dir
            .as_ref()
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
    }

    pub fn user_config_filepath() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(Self::FILENAME))
    }

    /// Resolution order: `solve.toml` in `dir` or its ancestors,
    /// then the user's config dir, then the built-in default.
    pub fn load_for_dir(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = fsutil::absolute_path(dir)?;
        let found = Self::find_file_in_ancestors(&dir)
            .or_else(|| Self::user_config_filepath().filter(|path| path.is_file()));

        match found {
            Some(path) => {
                log::debug!("Using config {:?}", path);
                Self::from_toml_file(path)
            }
            None => {
                log::debug!("Using built-in config");
                Ok(Self::builtin())
            }
        }
    }
}
