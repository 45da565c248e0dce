pub mod audit_logs;
pub mod auth;
pub mod dashboard;
pub mod personnel;
pub mod reference;
pub mod reports;
pub mod requests;
pub mod service_records;
pub mod setup;
pub mod users;
pub mod verification;
