use std::{
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
    time::Duration,
};

use anyhow::Context as _;
use tokio::{process::Command, time::Instant};

use super::{compare, result::*, testcase::*};
use crate::report::RunReport;

/// Receives progress of [`TestRunner::judge`] as each testcase starts and finishes.
pub trait RunObserver {
    fn testcase_started(&mut self, _testcase: &FsTestcase) {}
    fn testcase_finished(&mut self, result: &RunResult);
}

impl RunObserver for Vec<RunResult> {
    fn testcase_finished(&mut self, result: &RunResult) {
        self.push(result.clone());
    }
}

#[derive(Debug, Clone)]
pub struct TestRunner {
    artifact: PathBuf,
    time_limit: Duration,
}

impl TestRunner {
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(3);

    pub fn new(artifact: impl Into<PathBuf>) -> Self {
        Self {
            artifact: artifact.into(),
            time_limit: Self::DEFAULT_TIME_LIMIT,
        }
    }

    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn get_artifact(&self) -> &Path {
        &self.artifact
    }

    pub fn get_time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Run one testcase: stdin from `.in`, stdout to a truncated `.out`, stderr inherited.
    ///
    /// Errors only on infrastructure failures (unreadable input, spawn failure);
    /// every outcome of the program itself is a [`Verdict`].
    pub async fn run(&self, testcase: &FsTestcase) -> anyhow::Result<RunResult> {
        let input = fsutil::open(testcase.input_path())?;
        let output = fsutil::create(testcase.output_path())?;

        let start_at = Instant::now();
        let mut proc = {
            // The command owns the parent's copies of the file handles; drop it
            // right after spawning so they are closed before the next testcase.
            let mut cmd = Command::new(&self.artifact);
            cmd.stdin(Stdio::from(input))
                .stdout(Stdio::from(output))
                .stderr(Stdio::inherit())
                .kill_on_drop(true);
            cmd.spawn()
                .with_context(|| format!("Failed to spawn '{}'", self.artifact.to_string_lossy()))?
        };

        let res = tokio::time::timeout(self.time_limit, proc.wait()).await;
        let elapsed = start_at.elapsed();

        let status = match res {
            Err(_) => {
                proc.kill()
                    .await
                    .unwrap_or_else(|e| log::warn!("Failed to kill TLE process: {:#}", e));
                return Ok(RunResult::time_limit_exceeded(
                    testcase.name(),
                    self.time_limit,
                ));
            }
            Ok(status) => status.context("Failed to wait for subprocess")?,
        };

        let verdict = Self::classify(testcase, status)?;
        Ok(RunResult::new(testcase.name(), elapsed, verdict))
    }

    fn classify(testcase: &FsTestcase, status: ExitStatus) -> anyhow::Result<Verdict> {
        if !status.success() {
            return Ok(Verdict::RuntimeError);
        }
        if !testcase.has_answer() {
            return Ok(Verdict::Unknown);
        }
        let actual = fsutil::read(testcase.output_path())?;
        let expected = fsutil::read(testcase.answer_path())?;
        Ok(if compare::outputs_match(&actual, &expected) {
            Verdict::Accepted
        } else {
            Verdict::WrongAnswer
        })
    }

    /// Run every testcase in order and aggregate the results into `report`.
    ///
    /// Never stops early: a testcase that cannot even be started is logged and
    /// recorded as [`Verdict::RuntimeError`].
    pub async fn judge(
        &self,
        testcases: &[FsTestcase],
        report: &mut RunReport,
        observer: &mut impl RunObserver,
    ) {
        for t in testcases {
            observer.testcase_started(t);
            let res = self.run(t).await.unwrap_or_else(|e| {
                log::error!("Testcase {}: {:#}", t.name(), e);
                RunResult::new(t.name(), Duration::ZERO, Verdict::RuntimeError)
            });
            observer.testcase_finished(&res);
            report.record(res);
        }
    }

    /// Attach the program to this process's terminal with no limit and no judging.
    pub async fn run_interactive(&self) -> anyhow::Result<ExitStatus> {
        Command::new(&self.artifact)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("Failed to spawn '{}'", self.artifact.to_string_lossy()))
    }
}

#[cfg(all(test, unix))]
mod test {
    use super::*;
    use tempfile::TempDir;

    struct X {
        input: &'static str,
        answer: Option<&'static str>,
        script: &'static str,
        want: Verdict,
    }

    fn write_script(dir: &Path, script: &str) -> PathBuf {
        let path = dir.join("prog");
        fsutil::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
        fsutil::set_user_executable(&path).unwrap();
        path
    }

    fn write_testcase(dir: &Path, name: &str, input: &str, answer: Option<&str>) -> FsTestcase {
        let t = FsTestcase::new(dir, name);
        fsutil::write(t.input_path(), input).unwrap();
        if let Some(ans) = answer {
            fsutil::write(t.answer_path(), ans).unwrap();
        }
        t
    }

    async fn run_test(x: X) -> (TempDir, FsTestcase, RunResult) {
        let dir = tempfile::tempdir().unwrap();
        let prog = write_script(dir.path(), x.script);
        let t = write_testcase(dir.path(), "1", x.input, x.answer);

        let r = TestRunner::new(prog).time_limit(Duration::from_millis(300));
        let res = dbg!(r.run(&t).await).unwrap();
        assert_eq!(res.verdict, x.want);
        (dir, t, res)
    }

    #[tokio::test]
    async fn should_be_ac() {
        let (_dir, t, _) = run_test(X {
            input: "123\n",
            answer: Some("hello_123\n"),
            script: r#"read x; echo "hello_$x""#,
            want: Verdict::Accepted,
        })
        .await;
        assert_eq!(
            fsutil::read_to_string(t.output_path()).unwrap(),
            "hello_123\n"
        );
    }

    #[tokio::test]
    async fn should_be_ac_even_if_stdin_is_not_read() {
        run_test(X {
            input: "123\n",
            answer: Some("hello_123"),
            script: "echo hello_123",
            want: Verdict::Accepted,
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_ac_if_just_missing_newline() {
        run_test(X {
            input: "",
            answer: Some("4\n"),
            script: "printf 4",
            want: Verdict::Accepted,
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_wa() {
        run_test(X {
            input: "",
            answer: Some("42\n"),
            script: "echo 4 2",
            want: Verdict::WrongAnswer,
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_wa_if_output_goes_to_stderr() {
        run_test(X {
            input: "",
            answer: Some("hello\n"),
            script: "echo hello >&2",
            want: Verdict::WrongAnswer,
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_re_even_if_stdout_is_correct() {
        run_test(X {
            input: "",
            answer: Some("hello\n"),
            script: "echo hello; exit 42",
            want: Verdict::RuntimeError,
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_re_without_answer() {
        run_test(X {
            input: "",
            answer: None,
            script: "exit 1",
            want: Verdict::RuntimeError,
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_unknown_without_answer() {
        run_test(X {
            input: "",
            answer: None,
            script: "echo 1",
            want: Verdict::Unknown,
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_tle_with_limit_as_time() {
        let (_dir, _, res) = run_test(X {
            input: "",
            answer: Some("1\n"),
            script: "exec sleep 5",
            want: Verdict::TimeLimitExceeded,
        })
        .await;
        assert_eq!(res.elapsed_ms, 300);
    }

    #[tokio::test]
    async fn output_file_is_truncated_each_run() {
        let dir = tempfile::tempdir().unwrap();
        let prog = write_script(dir.path(), "echo short");
        let t = write_testcase(dir.path(), "1", "", None);
        fsutil::write(t.output_path(), "a much longer stale output\n").unwrap();

        TestRunner::new(prog).run(&t).await.unwrap();
        assert_eq!(fsutil::read_to_string(t.output_path()).unwrap(), "short\n");
    }

    #[tokio::test]
    async fn judge_runs_all_testcases_after_failures() {
        let dir = tempfile::tempdir().unwrap();
        let prog = write_script(
            dir.path(),
            r#"read x
case "$x" in
  sleep) exec sleep 5 ;;
  crash) exit 3 ;;
  *) echo "$x" ;;
esac"#,
        );
        let ts = vec![
            write_testcase(dir.path(), "1", "sleep\n", Some("sleep")),
            write_testcase(dir.path(), "2", "crash\n", Some("crash")),
            write_testcase(dir.path(), "3", "x\n", Some("y")),
            write_testcase(dir.path(), "4", "ok\n", Some("ok")),
            write_testcase(dir.path(), "5", "ok\n", None),
        ];

        let runner = TestRunner::new(prog).time_limit(Duration::from_millis(400));
        let mut report = RunReport::new("p", dir.path());
        let mut seen: Vec<RunResult> = Vec::new();
        runner.judge(&ts, &mut report, &mut seen).await;

        let verdicts: Vec<_> = seen.iter().map(|r| r.verdict).collect();
        assert_eq!(
            verdicts,
            vec![
                Verdict::TimeLimitExceeded,
                Verdict::RuntimeError,
                Verdict::WrongAnswer,
                Verdict::Accepted,
                Verdict::Unknown,
            ]
        );
        assert_eq!(report.wrong_answers, vec!["3"]);
        assert_eq!(report.max_elapsed_ms, 400);
        assert_eq!(report.results, seen);
    }

    #[tokio::test]
    async fn missing_program_is_recorded_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let ts = vec![write_testcase(dir.path(), "1", "", Some("1"))];

        let runner = TestRunner::new(dir.path().join("no-such-program"));
        let mut report = RunReport::new("p", dir.path());
        let mut seen: Vec<RunResult> = Vec::new();
        runner.judge(&ts, &mut report, &mut seen).await;

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].verdict, Verdict::RuntimeError);
    }
}
