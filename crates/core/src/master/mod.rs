//! Master-data rules: ID sequencing, department derivation, bulk-row
//! preparation.

pub mod bulk;
pub mod dept;
pub mod sequence;

pub use bulk::{BulkProjectRow, PreparedProjectRow, prepare_bulk_row};
pub use dept::derive_dept_code;
pub use sequence::{new_service_id, new_vendor_id, next_code_id, next_project_id};
