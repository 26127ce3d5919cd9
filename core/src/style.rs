use std::time::Duration;

use colored::{Color, ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

use crate::testing::{FsTestcase, RunObserver, RunResult, Verdict};

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for log::Level {
    fn color(&self) -> Color {
        use log::Level::*;
        match self {
            Error => Color::BrightRed,
            Warn => Color::BrightYellow,
            Info => Color::Cyan,
            Debug => Color::Magenta,
            Trace => Color::Blue,
        }
    }
}

impl ColorTheme for Verdict {
    fn color(&self) -> Color {
        use Verdict::*;
        match self {
            Accepted => Color::BrightGreen,
            WrongAnswer => Color::BrightRed,
            RuntimeError => Color::BrightBlue,
            TimeLimitExceeded => Color::BrightRed,
            Unknown => Color::BrightBlack,
        }
    }
}

pub fn verdict_label(verdict: Verdict) -> ColoredString {
    let label = match verdict {
        Verdict::Unknown => format!("{} (no ans data)", verdict),
        _ => format!("{:<4}", verdict.to_string()),
    };
    label.color(verdict.color())
}

/// `{name right-aligned to width} {verdict} {ms}ms`
pub fn result_line(res: &RunResult, name_width: usize) -> String {
    format!(
        "{:>width$} {} {}ms",
        res.testcase_name,
        self::verdict_label(res.verdict),
        res.elapsed_ms,
        width = name_width,
    )
}

pub fn max_time_line(max_elapsed_ms: u64) -> ColoredString {
    format!("Maximum Time: {}ms", max_elapsed_ms).bright_white()
}

/// Prints one aligned line per finished testcase, with a spinner while it runs.
pub struct ConsoleReporter {
    name_width: usize,
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new(testcases: &[FsTestcase]) -> Self {
        Self {
            name_width: testcases.iter().map(|t| t.name().len()).max().unwrap_or(0),
            spinner: None,
        }
    }

    pub fn name_width(&self) -> usize {
        self.name_width
    }
}

impl RunObserver for ConsoleReporter {
    fn testcase_started(&mut self, testcase: &FsTestcase) {
        let style = ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let bar = ProgressBar::new_spinner()
            .with_style(style)
            .with_message(format!("{:>width$} ...", testcase.name(), width = self.name_width));
        bar.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(bar);
    }

    fn testcase_finished(&mut self, result: &RunResult) {
        if let Some(bar) = self.spinner.take() {
            bar.finish_and_clear();
        }
        println!("{}", self::result_line(result, self.name_width));
    }
}
