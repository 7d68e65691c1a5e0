//! Storage-backed `CustomerDao` implementations.

pub mod seaorm;
pub mod sql;

#[cfg(test)]
mod contract;

use std::sync::Arc;

use configs::DataAccessKind;
use sea_orm::DatabaseConnection;

use super::repository::CustomerDao;

pub use seaorm::SeaOrmCustomerDao;
pub use sql::SqlCustomerDao;

/// Build the configured data-access object over a shared pool.
pub fn build_dao(kind: DataAccessKind, db: DatabaseConnection) -> Arc<dyn CustomerDao> {
    match kind {
        DataAccessKind::Orm => Arc::new(SeaOrmCustomerDao::new(db)),
        DataAccessKind::Sql => Arc::new(SqlCustomerDao::new(db)),
    }
}
