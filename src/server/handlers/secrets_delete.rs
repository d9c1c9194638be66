use crate::{
    server::{
        app_state::AppState, handlers::secrets_update::SecretIdPath,
        http_errors::secrets_error_response,
    },
    users::User,
};
use actix_web::{HttpResponse, web};

/// DELETE /api/secrets/{secret_id}
pub async fn secrets_delete(
    state: web::Data<AppState>,
    user: User,
    path: web::Path<SecretIdPath>,
) -> HttpResponse {
    let secrets_api = state.api.secrets(&user);
    let secret = match secrets_api.find_secret(path.secret_id).await {
        Ok(secret) => secret,
        Err(err) => return secrets_error_response(err),
    };

    match secrets_api.delete_secret(&secret).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => secrets_error_response(err),
    }
}
