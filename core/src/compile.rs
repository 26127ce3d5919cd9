//! Content-addressed build cache.
//!
//! A source file `dir/{stem}.{ext}` is built into `dir/.tmp/{stem}_{hash}`,
//! where `hash` is a prefix of the SHA-256 of the source bytes. An existing
//! artifact at that path is trusted as-is. Stale artifacts are never removed.

use std::{
    collections::HashMap,
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
    process,
};

use sha2::{Digest, Sha256};
use tokio::process::Command;

use crate::config::{CompileRule, CompileRules};
use crate::str_interp::{self, InterpError};

pub type Result<T> = std::result::Result<T, BuildError>;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Cannot find compile command (.{0})")]
    NoCompileRule(String),

    #[error("Cannot determine file extension of '{0}'")]
    MissingExtension(PathBuf),

    #[error("Invalid compile rule for '{0}': {1}")]
    Interp(String, #[source] InterpError),

    #[error("Failed to spawn '{cmdline}': {source}")]
    Spawn {
        cmdline: String,
        #[source]
        source: io::Error,
    },

    #[error("Compile failed ({}): {cmdline}", describe_exit(.code))]
    CompileFailed { cmdline: String, code: Option<i32> },

    #[error("Compile command succeeded but produced no artifact at '{0}'")]
    ArtifactNotProduced(PathBuf),

    #[error(transparent)]
    Fs(#[from] fsutil::Error),
}

/// Parent dir of `path`, `.` for a bare file name.
pub fn source_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exitcode={}", c),
        None => "terminated by signal".to_owned(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    /// `false` when the artifact was already cached.
    pub freshly_built: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CompileCache<'r> {
    rules: &'r CompileRules,
}

impl<'r> CompileCache<'r> {
    pub const CACHE_DIR_NAME: &'static str = ".tmp";
    pub const HASH_PREFIX_LEN: usize = 6;

    pub fn new(rules: &'r CompileRules) -> Self {
        Self { rules }
    }

    pub fn cache_dir(source: &Path) -> PathBuf {
        source_dir(source).join(Self::CACHE_DIR_NAME)
    }

    pub fn content_hash(bytes: &[u8]) -> String {
        let digest = Sha256::digest(bytes);
        let mut h = hex::encode(digest);
        h.truncate(Self::HASH_PREFIX_LEN);
        h
    }

    /// `{stem}_{hash}`
    pub fn cache_key(source: &Path, bytes: &[u8]) -> String {
        let stem = source
            .file_stem()
            .unwrap_or(OsStr::new("a"))
            .to_string_lossy();
        format!("{}_{}", stem, Self::content_hash(bytes))
    }

    pub fn find_rule(&self, source: &Path) -> Result<&'r CompileRule> {
        let ext = source
            .extension()
            .ok_or_else(|| BuildError::MissingExtension(source.to_owned()))?
            .to_string_lossy();
        self.rules
            .find(&ext)
            .ok_or_else(|| BuildError::NoCompileRule(ext.into_owned()))
    }

    /// Return the artifact for `source`, building it on cache miss.
    pub async fn resolve(&self, source: impl AsRef<Path>) -> Result<Artifact> {
        let source = source.as_ref();
        let rule = self.find_rule(source)?;

        let bytes = fsutil::read(source)?;
        let cache_dir = Self::cache_dir(source);
        let key = Self::cache_key(source, &bytes);
        let artifact = cache_dir.join(&key);

        if artifact.exists() {
            log::info!("Skipping compile ({})", artifact.to_string_lossy());
            return Ok(Artifact {
                path: artifact,
                freshly_built: false,
            });
        }

        fsutil::mkdir_all(&cache_dir)?;
        let staging = cache_dir.join(format!(".{}.{}.partial", key, process::id()));

        let res = self.build(source, rule, &bytes, &staging).await;
        if res.is_err() && staging.exists() {
            fsutil::remove_file(&staging)
                .unwrap_or_else(|e| log::warn!("Failed to clean up staging file: {:#}", e));
        }
        res?;

        fsutil::rename(&staging, &artifact)?;
        Ok(Artifact {
            path: artifact,
            freshly_built: true,
        })
    }

    async fn build(
        &self,
        source: &Path,
        rule: &CompileRule,
        bytes: &[u8],
        out: &Path,
    ) -> Result<()> {
        if let Some(shebang) = &rule.shebang {
            let mut contents = Vec::with_capacity(shebang.len() + 1 + bytes.len());
            contents.extend_from_slice(shebang.as_bytes());
            contents.push(b'\n');
            contents.extend_from_slice(bytes);
            fsutil::write(out, contents)?;
            fsutil::set_user_executable(out)?;
        }

        let vars = Self::make_interp_vars(source, out);
        let args = str_interp::interp_args(&rule.args, &vars)
            .map_err(|e| BuildError::Interp(rule.program.clone(), e))?;
        let cmdline = Self::display_cmdline(&rule.program, &args);
        log::info!("{}", cmdline);

        let status = Command::new(&rule.program)
            .args(&args)
            .status()
            .await
            .map_err(|e| BuildError::Spawn {
                cmdline: cmdline.clone(),
                source: e,
            })?;

        if !status.success() {
            return Err(BuildError::CompileFailed {
                cmdline,
                code: status.code(),
            });
        }
        if !out.exists() {
            return Err(BuildError::ArtifactNotProduced(out.to_owned()));
        }
        Ok(())
    }

    fn make_interp_vars<'a>(
        source: &'a Path,
        artifact: &'a Path,
    ) -> HashMap<&'static str, &'a OsStr> {
        let mut m: HashMap<_, &OsStr> = HashMap::new();
        m.insert("source", source.as_os_str());
        m.insert("artifact", artifact.as_os_str());
        m.insert("sourceDir", source_dir(source).as_os_str());
        m.insert("sourceStem", source.file_stem().unwrap_or(OsStr::new("")));
        m
    }

    fn display_cmdline(program: &str, args: &[String]) -> String {
        std::iter::once(program)
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
