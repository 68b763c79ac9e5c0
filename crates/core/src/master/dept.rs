//! Department code derivation for bulk project import.
//!
//! Spreadsheet rows carry a cost-center name, not a department code; the
//! managing department is inferred from well-known team names. No match
//! means the row lacks a required field and must be skipped by the caller.

/// Derives the managing department code (`A`, `B`, `C`) from a cost-center
/// name.
#[must_use]
pub fn derive_dept_code(cost_center_name: Option<&str>) -> Option<&'static str> {
    let name = cost_center_name?.trim();
    if name.is_empty() {
        return None;
    }
    let name = name.to_uppercase();

    if name.contains("DX개발운영팀") || name.contains("IT운영팀") || name.contains("HR/GA PL") {
        return Some("A");
    }
    if name.contains("DX기획팀") {
        return Some("B");
    }
    if name.contains("보안") || name.contains("SECURITY") {
        return Some("C");
    }
    None
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("DX개발운영팀"), Some("A"))]
    #[case(Some("IT운영팀 (본사)"), Some("A"))]
    #[case(Some("DX기획팀"), Some("B"))]
    #[case(Some("정보보안팀"), Some("C"))]
    #[case(Some("Security Operations"), Some("C"))]
    #[case(Some("총무팀"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn test_derive_dept_code(#[case] name: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(derive_dept_code(name), expected);
    }
}
