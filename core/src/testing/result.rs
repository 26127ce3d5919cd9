use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Verdict {
    #[strum(serialize = "AC")]
    Accepted,

    #[strum(serialize = "WA")]
    WrongAnswer,

    #[strum(serialize = "RTE")]
    RuntimeError,

    #[strum(serialize = "TLE")]
    TimeLimitExceeded,

    /// Exited normally but there is no answer file to compare with.
    #[strum(serialize = "?")]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub testcase_name: String,
    pub elapsed_ms: u64,
    pub verdict: Verdict,
}

impl RunResult {
    pub fn new(testcase_name: impl Into<String>, elapsed: Duration, verdict: Verdict) -> Self {
        Self {
            testcase_name: testcase_name.into(),
            elapsed_ms: whole_millis(elapsed),
            verdict,
        }
    }

    /// A timed-out run is recorded as exactly the limit, not its true duration.
    pub fn time_limit_exceeded(testcase_name: impl Into<String>, limit: Duration) -> Self {
        Self::new(testcase_name, limit, Verdict::TimeLimitExceeded)
    }
}

/// Floor of `d` in milliseconds.
pub fn whole_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verdict_labels() {
        assert_eq!(Verdict::Accepted.to_string(), "AC");
        assert_eq!(Verdict::WrongAnswer.to_string(), "WA");
        assert_eq!(Verdict::RuntimeError.to_string(), "RTE");
        assert_eq!(Verdict::TimeLimitExceeded.to_string(), "TLE");
        assert_eq!(Verdict::Unknown.to_string(), "?");
    }

    #[test]
    fn millis_are_floored() {
        assert_eq!(whole_millis(Duration::from_micros(1999)), 1);
        assert_eq!(whole_millis(Duration::from_micros(999)), 0);
        assert_eq!(whole_millis(Duration::from_secs(2)), 2000);
    }

    #[test]
    fn tle_uses_limit_as_sentinel() {
        let r = RunResult::time_limit_exceeded("1", Duration::from_secs(3));
        assert_eq!(r.elapsed_ms, 3000);
        assert_eq!(r.verdict, Verdict::TimeLimitExceeded);
    }
}
