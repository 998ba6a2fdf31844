use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::climate::Error;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::MalformedDate(_) => {
                warn!("rejected request: {}", self);
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Error::InvalidStoredDate(_) => {
                error!("bad data in climate store: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Climate store unavailable"),
                )
            }
            Error::StoreUnavailable(e) => {
                error!("error querying climate store: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Climate store unavailable"),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
