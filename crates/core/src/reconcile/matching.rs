//! Project identifier extraction from ledger free text.

use once_cell::sync::Lazy;
use regex::Regex;

/// One uppercase letter, a hyphen, three digits, optionally bracketed:
/// `A-001` or `[A-001]`. Case-sensitive by design - lowercase text never
/// matches.
static PROJECT_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[?([A-Z]-\d{3})\]?").expect("project ref pattern compiles"));

/// Extracts the first project identifier from a header text.
///
/// Single pass, first match; whether the identifier names a real project is
/// the caller's check against the master registry.
#[must_use]
pub fn extract_project_ref(header_text: &str) -> Option<&str> {
    PROJECT_REF
        .captures(header_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("[A-001] monthly fee", Some("A-001"))]
    #[case("A-001 monthly fee", Some("A-001"))]
    #[case("maintenance B-123", Some("B-123"))]
    #[case("no id here", None)]
    #[case("a-001 lowercase", None)]
    #[case("A-01 too short", None)]
    #[case("first C-201 then D-202", Some("C-201"))]
    #[case("", None)]
    fn test_extract_project_ref(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_project_ref(text), expected);
    }
}
