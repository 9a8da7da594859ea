mod report_service;
mod report_store;

pub use report_service::ReportService;
pub use report_store::{PgReportStore, ReportStore};
