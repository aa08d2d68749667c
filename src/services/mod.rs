// Service exports
pub mod postgres;

pub use postgres::{AnalysisRecord, PostgresClient, PostgresError};
