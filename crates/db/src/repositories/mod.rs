//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.
//! Every gated write path goes through [`period::ensure_month_open`].

pub mod code;
pub mod monthly;
pub mod period;
pub mod project;
pub mod raw_ledger;
pub mod reconciliation;
pub mod report;
pub mod service;
pub mod transfer;
pub mod vendor;

pub use code::{CodeError, CodeRepository, CreateCodeInput, UpdateCodeInput};
pub use monthly::{MonthlyError, MonthlyRepository, MonthlyStatusRow};
pub use period::{ClosingError, PeriodRepository, PeriodStatusView, ensure_month_open};
pub use project::{BulkUpsertSummary, CreateProjectInput, ProjectError, ProjectRepository};
pub use raw_ledger::{RawLedgerError, RawLedgerRepository};
pub use reconciliation::{AutoMatchSummary, ReconcileError, ReconciliationRepository};
pub use report::{BudgetVsActualRow, ReportError, ReportRepository};
pub use service::{CreateServiceInput, ServiceError, ServiceRepository, UpdateServiceInput};
pub use transfer::{TransferError, TransferInput, TransferRepository};
pub use vendor::{CreateVendorInput, UpdateVendorInput, VendorError, VendorRepository};
