//! Whitespace-insensitive output comparison, in the spirit of `diff -wB`.
//!
//! Two outputs match when their non-blank lines are pairwise equal after
//! splitting each line into whitespace-separated tokens. So trailing
//! newlines, blank lines, indentation and runs of spaces are ignored, but
//! whitespace is never removed between tokens: `4 2` does not match `42`.

fn normalized_lines(s: &[u8]) -> impl Iterator<Item = Vec<&[u8]>> {
    s.split(|&b| b == b'\n')
        .map(|line| {
            line.split(u8::is_ascii_whitespace)
                .filter(|token| !token.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|tokens| !tokens.is_empty())
}

/// Compared on raw bytes; output need not be UTF-8.
pub fn outputs_match(actual: &[u8], expected: &[u8]) -> bool {
    normalized_lines(actual).eq(normalized_lines(expected))
}
