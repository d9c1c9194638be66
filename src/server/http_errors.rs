use crate::secrets::SecretsError;
use actix_web::HttpResponse;
use serde_json::json;
use tracing::{error, warn};

pub fn generic_internal_server_error() -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(json!({ "message": "The operation could not be completed due to a system error. Please try again later or contact us for assistance." }))
}

/// Maps a secrets engine error to a transport response. Handlers branch on
/// the closed error enum, never on message text.
pub fn secrets_error_response(err: SecretsError) -> HttpResponse {
    match err {
        SecretsError::NoPermission { user_id, secret_id } => {
            warn!(user.id = %user_id, secret.id = %secret_id, "Secret access denied.");
            HttpResponse::Forbidden().json(json!({ "message": "Access Forbidden" }))
        }
        SecretsError::TypeChangeForbidden => HttpResponse::BadRequest()
            .json(json!({ "message": "Secret type cannot be changed." })),
        SecretsError::NotFound(secret_id) => HttpResponse::NotFound()
            .json(json!({ "message": format!("Secret {secret_id} not found.") })),
        SecretsError::Codec(_) => {
            HttpResponse::BadRequest().json(json!({ "message": "Secret payload is malformed." }))
        }
        err @ (SecretsError::Crypto(_) | SecretsError::Storage(_) | SecretsError::Archive(_)) => {
            error!("Failed to complete secret operation: {err:?}");
            generic_internal_server_error()
        }
    }
}
