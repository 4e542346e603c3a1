pub mod piece;

pub use piece::PieceDao;

use crate::models::piece::ModelError;

/// Errors from the data-access layer. Nothing is handled here, every failure
/// reaches the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum DaoError {
    #[error("data access error: {0}")]
    DataAccess(#[from] sqlx::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type DaoResult<T> = Result<T, DaoError>;
