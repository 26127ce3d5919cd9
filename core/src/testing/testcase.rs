use std::path::{Path, PathBuf};

use solve_webclient::SampleTestcase;

use crate::problem::ProblemName;

pub const INPUT_EXT: &str = "in";
pub const ANSWER_EXT: &str = "ans";
pub const OUTPUT_EXT: &str = "out";

/// `{name}.in`, with `{name}.ans` (optional) and `{name}.out` (written by each run)
/// next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsTestcase {
    name: String,
    dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestcaseLayout {
    /// `{root}/{problem}/*.in`
    #[default]
    PerProblem,
    /// `{root}/*.in`
    Flat,
}

impl TestcaseLayout {
    pub fn from_flat_flag(flat: bool) -> Self {
        if flat {
            Self::Flat
        } else {
            Self::PerProblem
        }
    }

    pub fn testcase_dir(self, root: impl AsRef<Path>, problem: &ProblemName) -> PathBuf {
        let root = root.as_ref();
        match self {
            Self::PerProblem => root.join(problem),
            Self::Flat => root.to_owned(),
        }
    }
}

impl FsTestcase {
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }

    /// `None` unless the file name ends with `.in`.
    pub fn from_input_path(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let filename = path.file_name()?.to_str()?;
        let name = filename.strip_suffix(".in")?;
        if name.is_empty() {
            return None;
        }
        let dir = path.parent().unwrap_or(Path::new(""));
        Some(Self::new(dir, name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_path(&self) -> PathBuf {
        self.path_with_ext(INPUT_EXT)
    }

    pub fn answer_path(&self) -> PathBuf {
        self.path_with_ext(ANSWER_EXT)
    }

    pub fn output_path(&self) -> PathBuf {
        self.path_with_ext(OUTPUT_EXT)
    }

    pub fn has_answer(&self) -> bool {
        self.answer_path().is_file()
    }

    fn path_with_ext(&self, ext: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", self.name, ext))
    }

    /// All `*.in` files in `dir`, sorted by name in byte order (`a1`, `a10`, `a2`).
    /// A missing dir yields no testcases.
    pub fn enumerate(dir: impl AsRef<Path>) -> fsutil::Result<Vec<Self>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut res = Vec::new();
        for entry in fsutil::read_dir(dir)?.filter_map(Result::ok) {
            let Ok(ft) = entry.file_type() else {
                continue
            };
            if ft.is_dir() {
                continue;
            }
            if let Some(t) = Self::from_input_path(entry.path()) {
                res.push(t)
            }
        }
        res.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(res)
    }

    /// Write samples as `{ord}.in` / `{ord}.ans` in `dir`, overwriting existing files.
    pub fn save_samples(
        dir: impl AsRef<Path>,
        samples: &[SampleTestcase],
    ) -> fsutil::Result<Vec<Self>> {
        let dir = dir.as_ref();
        fsutil::mkdir_all(dir)?;
        samples
            .iter()
            .map(|s| {
                let t = Self::new(dir, s.ord.to_string());
                fsutil::write(t.input_path(), &s.input)?;
                fsutil::write(t.answer_path(), &s.expected)?;
                Ok(t)
            })
            .collect()
    }
}

/// Dir holding the testcases of the problem that `source_file` solves.
pub fn locate_testcase_dir(
    source_file: impl AsRef<Path>,
    testcase_root: impl AsRef<Path>,
    layout: TestcaseLayout,
) -> Option<PathBuf> {
    let problem = ProblemName::from_source_file(source_file)?;
    Some(layout.testcase_dir(testcase_root, &problem))
}

#[cfg(test)]
mod test {
    use super::*;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fsutil::write(dir.join(name), "").unwrap();
        }
    }

    #[test]
    fn derived_paths() {
        let t = FsTestcase::from_input_path("testcase/1000/3.in").unwrap();
        assert_eq!(t.name(), "3");
        assert_eq!(t.input_path(), Path::new("testcase/1000/3.in"));
        assert_eq!(t.answer_path(), Path::new("testcase/1000/3.ans"));
        assert_eq!(t.output_path(), Path::new("testcase/1000/3.out"));

        assert_eq!(FsTestcase::from_input_path("testcase/1000/3.ans"), None);
        assert_eq!(FsTestcase::from_input_path("testcase/1000/3.input"), None);
        assert_eq!(FsTestcase::from_input_path("testcase/1000/.in"), None);
    }

    #[test]
    fn enumerate_is_lexicographic() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &["a2.in", "a10.in", "a1.in", "a1.ans", "a1.out", "notes.txt"],
        );
        std::fs::create_dir(dir.path().join("sub.in")).unwrap();

        let names: Vec<_> = FsTestcase::enumerate(dir.path())
            .unwrap()
            .iter()
            .map(|t| t.name().to_owned())
            .collect();
        assert_eq!(names, vec!["a1", "a10", "a2"]);
    }

    #[test]
    fn enumerate_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let got = FsTestcase::enumerate(dir.path().join("nope")).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn has_answer_checks_ans_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["1.in", "1.ans", "2.in"]);
        let ts = FsTestcase::enumerate(dir.path()).unwrap();
        assert!(ts[0].has_answer());
        assert!(!ts[1].has_answer());
    }

    #[test]
    fn locate_by_layout() {
        assert_eq!(
            locate_testcase_dir("1000_dp.cpp", "testcase", TestcaseLayout::PerProblem).unwrap(),
            Path::new("testcase/1000")
        );
        assert_eq!(
            locate_testcase_dir("src/1000.py", "tc", TestcaseLayout::Flat).unwrap(),
            Path::new("tc")
        );
        assert_eq!(TestcaseLayout::from_flat_flag(false), TestcaseLayout::PerProblem);
        assert_eq!(TestcaseLayout::from_flat_flag(true), TestcaseLayout::Flat);
    }

    #[test]
    fn save_samples_numbers_files() {
        let dir = tempfile::tempdir().unwrap();
        let samples = vec![
            SampleTestcase::new(1, "1 2", "3"),
            SampleTestcase::new(2, "5 5", "10"),
        ];
        let saved = FsTestcase::save_samples(dir.path().join("1000"), &samples).unwrap();

        assert_eq!(saved.len(), 2);
        assert_eq!(fsutil::read_to_string(saved[1].input_path()).unwrap(), "5 5");
        assert_eq!(fsutil::read_to_string(saved[1].answer_path()).unwrap(), "10");
        assert_eq!(
            FsTestcase::enumerate(dir.path().join("1000")).unwrap(),
            saved
        );
    }
}
