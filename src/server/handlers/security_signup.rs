use crate::{
    server::{
        app_state::AppState, handlers::security_signin::access_token_response,
        http_errors::generic_internal_server_error,
    },
    users::UserSignupError,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    pub email: String,
    pub password: String,
}

/// POST /api/signup
pub async fn security_signup(
    state: web::Data<AppState>,
    body: web::Json<SignupBody>,
) -> HttpResponse {
    match state
        .api
        .security()
        .signup(&body.email, &body.password)
        .await
    {
        Ok((_, access_token)) => access_token_response(&state, access_token, HttpResponse::Created()),
        Err(err) => match err.downcast_ref::<UserSignupError>() {
            Some(UserSignupError::EmailAlreadyRegistered) => {
                HttpResponse::Conflict().json(json!({ "message": err.to_string() }))
            }
            None if is_client_error(&err.to_string()) => {
                HttpResponse::BadRequest().json(json!({ "message": err.to_string() }))
            }
            None => {
                error!("Failed to signup user: {err:?}");
                generic_internal_server_error()
            }
        },
    }
}

fn is_client_error(msg: &str) -> bool {
    msg.contains("Email is not valid") || msg.contains("Password must be at least")
}
