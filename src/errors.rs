use axum::{http::StatusCode, response::IntoResponse, Json};
use log::error;
use serde_json::json;

use crate::dao::DaoError;

// Custom Errors used in handlers
#[derive(Debug)]
pub enum CustomError {
    InternalServerError,
    CorruptPieceData,
}

//implementation of custom errors that are used in handlers
impl IntoResponse for CustomError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Self::InternalServerError => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            Self::CorruptPieceData => (StatusCode::INTERNAL_SERVER_ERROR, "Stored piece data is corrupt"),
        };
        (status, Json(json!({"error": error_message}))).into_response()
    }
}

// Every DAO failure ends up here, so this is where it gets logged
impl From<DaoError> for CustomError {
    fn from(err: DaoError) -> Self {
        match err {
            DaoError::DataAccess(err) => {
                error!("Database error: {:?}", err);
                CustomError::InternalServerError
            }
            DaoError::Model(err) => {
                error!("Unreadable piece row: {}", err);
                CustomError::CorruptPieceData
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::piece::ModelError;

    #[test]
    fn test_dao_errors_map_to_custom_errors() {
        let err = CustomError::from(DaoError::DataAccess(sqlx::Error::PoolClosed));
        assert!(matches!(err, CustomError::InternalServerError));

        let err = CustomError::from(DaoError::Model(ModelError::OffBoard { x: 0, y: 0 }));
        assert!(matches!(err, CustomError::CorruptPieceData));
    }

    #[test]
    fn test_into_response_status() {
        let response = CustomError::CorruptPieceData.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
