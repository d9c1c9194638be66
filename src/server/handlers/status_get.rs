use crate::server::{app_state::AppState, status::Status};
use actix_web::{HttpResponse, web};

/// GET /api/status
pub async fn status_get(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(Status {
        version: state.config.version.clone(),
    })
}
