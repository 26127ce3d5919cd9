use std::io;

use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffChoice {
    Show,
    Skip,
    Quit,
}

impl DiffChoice {
    /// First non-space character, case-insensitive: `y`, `n` or `q`.
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim_start().chars().next()?.to_ascii_lowercase() {
            'y' => Some(Self::Show),
            'n' => Some(Self::Skip),
            'q' => Some(Self::Quit),
            _ => None,
        }
    }
}

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

pub fn ask_text(prompt: &str) -> io::Result<String> {
    Input::with_theme(&theme())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
}

/// Ask until the answer is one of y/n/q.
pub fn ask_diff_choice() -> io::Result<DiffChoice> {
    loop {
        if let Some(choice) = DiffChoice::parse(&ask_text("Show? (y/n/q)")?) {
            return Ok(choice);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_choice() {
        assert_eq!(DiffChoice::parse("y"), Some(DiffChoice::Show));
        assert_eq!(DiffChoice::parse("  Yes"), Some(DiffChoice::Show));
        assert_eq!(DiffChoice::parse("N"), Some(DiffChoice::Skip));
        assert_eq!(DiffChoice::parse("quit"), Some(DiffChoice::Quit));
        assert_eq!(DiffChoice::parse(""), None);
        assert_eq!(DiffChoice::parse("   "), None);
        assert_eq!(DiffChoice::parse("x"), None);
    }
}
