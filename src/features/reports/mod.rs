//! Citizen reports: photo-backed submissions and per-user history.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/reports` | Submit a report (multipart, optional `image`) |
//! | GET | `/api/reports?userId=` | List a user's reports, newest first |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{PgReportStore, ReportService, ReportStore};
