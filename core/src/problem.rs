use std::{fmt, path::Path};

/// Problem identifier shared by every solution variant of one problem.
///
/// Solution files follow the convention `{problem}_{variant}.ext`, so the
/// identifier is the file stem truncated at its first underscore:
/// `1000.cpp`, `1000_greedy.cpp` and `1000_dp_v2.py` all map to `1000`.
/// Nothing beyond that truncation is inferred from the variant part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProblemName(String);

impl ProblemName {
    pub fn from_stem(stem: &str) -> Self {
        let name = match stem.find('_') {
            Some(i) => &stem[..i],
            None => stem,
        };
        Self(name.to_owned())
    }

    pub fn from_source_file(path: impl AsRef<Path>) -> Option<Self> {
        let stem = path.as_ref().file_stem()?;
        Some(Self::from_stem(&stem.to_string_lossy()))
    }

    /// Like [`ProblemName::from_stem`], but also cuts at the first `.`,
    /// so both `1000_a` and `1000_a.cpp` are accepted.
    pub fn parse_loose(s: &str) -> Self {
        let end = s.find(|c| c == '_' || c == '.').unwrap_or(s.len());
        Self(s[..end].to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProblemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for ProblemName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn truncates_at_first_underscore() {
        assert_eq!(ProblemName::from_stem("1000").as_str(), "1000");
        assert_eq!(ProblemName::from_stem("1000_greedy").as_str(), "1000");
        assert_eq!(ProblemName::from_stem("1000_dp_v2").as_str(), "1000");
        assert_eq!(ProblemName::from_stem("_x").as_str(), "");
    }

    #[test]
    fn from_source_file_uses_stem() {
        let name = ProblemName::from_source_file("solutions/1000_dp.cpp").unwrap();
        assert_eq!(name.as_str(), "1000");

        let name = ProblemName::from_source_file("abc.tar.py").unwrap();
        assert_eq!(name.as_str(), "abc.tar");

        assert_eq!(ProblemName::from_source_file("/"), None);
    }

    #[test]
    fn parse_loose_cuts_extension_too() {
        assert_eq!(ProblemName::parse_loose("1000").as_str(), "1000");
        assert_eq!(ProblemName::parse_loose("1000.cpp").as_str(), "1000");
        assert_eq!(ProblemName::parse_loose("1000_a.cpp").as_str(), "1000");
    }
}
