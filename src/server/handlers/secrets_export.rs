use crate::{
    server::{app_state::AppState, http_errors::secrets_error_response},
    users::User,
};
use actix_web::{HttpResponse, http::header::ContentDisposition, web};

/// GET /api/secrets
pub async fn secrets_export(state: web::Data<AppState>, user: User) -> HttpResponse {
    match state.api.secrets(&user).export_secrets().await {
        Ok(archive) => HttpResponse::Ok()
            .content_type("application/zip")
            .insert_header(ContentDisposition::attachment("secrets.zip"))
            .body(archive),
        Err(err) => secrets_error_response(err),
    }
}
