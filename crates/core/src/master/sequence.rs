//! Master-data ID generation.
//!
//! Projects and classification codes use per-group sequential numbering
//! derived from the current maximum (`A-007` -> `A-008`). Vendors and
//! services get short random codes from a UUID fragment.

use opexhub_shared::types::{CodeId, ProjectId, ServiceId, VendorId};
use uuid::Uuid;

/// Computes the numeric suffix following `last`, starting at 1 when there is
/// no predecessor or its suffix is not numeric.
fn next_seq(last: Option<&str>, separator: char) -> u32 {
    last.and_then(|id| id.rsplit(separator).next())
        .and_then(|suffix| suffix.parse::<u32>().ok())
        .map_or(1, |n| n + 1)
}

/// Next project id for a department, `<dept>-<seq3>`.
///
/// `last_id` is the department's current maximum project id (lexicographic),
/// or `None` for an empty department.
#[must_use]
pub fn next_project_id(dept_code: &str, last_id: Option<&str>) -> ProjectId {
    let seq = next_seq(last_id, '-');
    ProjectId::new(format!("{dept_code}-{seq:03}"))
}

/// Next classification code id for a code type, `<TYPE>_<seq3>`.
#[must_use]
pub fn next_code_id(code_type: &str, last_id: Option<&str>) -> CodeId {
    let seq = next_seq(last_id, '_');
    let prefix = code_type.to_uppercase();
    CodeId::new(format!("{prefix}_{seq:03}"))
}

/// Generates a vendor id, `V` plus four uppercase hex chars.
#[must_use]
pub fn new_vendor_id() -> VendorId {
    VendorId::new(format!("V{}", uuid_fragment()))
}

/// Generates a service id, `SVC-` plus four uppercase hex chars.
#[must_use]
pub fn new_service_id() -> ServiceId {
    ServiceId::new(format!("SVC-{}", uuid_fragment()))
}

fn uuid_fragment() -> String {
    Uuid::new_v4().simple().to_string()[..4].to_uppercase()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("A", Some("A-007"), "A-008")]
    #[case("A", None, "A-001")]
    #[case("B", Some("B-099"), "B-100")]
    #[case("C", Some("C-XYZ"), "C-001")]
    fn test_next_project_id(
        #[case] dept: &str,
        #[case] last: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(next_project_id(dept, last).as_str(), expected);
    }

    #[rstest]
    #[case("BUDGET_L1", Some("BUDGET_L1_005"), "BUDGET_L1_006")]
    #[case("BUDGET_L1", None, "BUDGET_L1_001")]
    #[case("it_type", Some("IT_TYPE_011"), "IT_TYPE_012")]
    fn test_next_code_id(
        #[case] code_type: &str,
        #[case] last: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(next_code_id(code_type, last).as_str(), expected);
    }

    #[test]
    fn test_vendor_id_shape() {
        let id = new_vendor_id();
        assert_eq!(id.as_str().len(), 5);
        assert!(id.as_str().starts_with('V'));
    }

    #[test]
    fn test_service_id_shape() {
        let id = new_service_id();
        assert!(id.as_str().starts_with("SVC-"));
        assert_eq!(id.as_str().len(), 8);
    }
}
