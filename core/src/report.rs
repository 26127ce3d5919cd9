use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compile::{self, CompileCache};
use crate::testing::{RunResult, Verdict};

/// Aggregate of one judging invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub problem_name: String,
    pub testcase_dir: PathBuf,
    /// Names of WA testcases, in execution order.
    pub wrong_answers: Vec<String>,
    /// TLE testcases take part with their sentinel time.
    pub max_elapsed_ms: u64,
    pub results: Vec<RunResult>,
}

impl RunReport {
    pub fn new(problem_name: impl Into<String>, testcase_dir: impl Into<PathBuf>) -> Self {
        Self {
            problem_name: problem_name.into(),
            testcase_dir: testcase_dir.into(),
            wrong_answers: Vec::new(),
            max_elapsed_ms: 0,
            results: Vec::new(),
        }
    }

    pub fn record(&mut self, res: RunResult) {
        self.max_elapsed_ms = self.max_elapsed_ms.max(res.elapsed_ms);
        if res.verdict == Verdict::WrongAnswer {
            self.wrong_answers.push(res.testcase_name.clone());
        }
        self.results.push(res);
    }

    pub fn recent_run(&self) -> RecentRun {
        RecentRun {
            problem_name: self.problem_name.clone(),
            testcase_directory: self.testcase_dir.clone(),
            wa_list: self.wrong_answers.clone(),
        }
    }
}

/// The single most-recent-run record handed from `run` to `diff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentRun {
    pub problem_name: String,
    /// Absolute
    pub testcase_directory: PathBuf,
    pub wa_list: Vec<String>,
}

impl RecentRun {
    pub const FILENAME: &'static str = "recent";

    /// `{dir}/.tmp/recent`
    pub fn filepath(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref()
            .join(CompileCache::CACHE_DIR_NAME)
            .join(Self::FILENAME)
    }

    pub fn filepath_for_source(source_file: impl AsRef<Path>) -> PathBuf {
        Self::filepath(compile::source_dir(source_file.as_ref()))
    }

    /// Replaces any previous record.
    pub fn save(&self, filepath: impl AsRef<Path>) -> fsutil::Result<()> {
        fsutil::write_json_with_mkdir(filepath, self)
    }

    pub fn load(filepath: impl AsRef<Path>) -> fsutil::Result<Self> {
        fsutil::read_json_with_deserialize(filepath)
    }

    pub fn output_path(&self, testcase_name: &str) -> PathBuf {
        self.testcase_directory
            .join(format!("{}.{}", testcase_name, crate::testing::OUTPUT_EXT))
    }

    pub fn answer_path(&self, testcase_name: &str) -> PathBuf {
        self.testcase_directory
            .join(format!("{}.{}", testcase_name, crate::testing::ANSWER_EXT))
    }
}
