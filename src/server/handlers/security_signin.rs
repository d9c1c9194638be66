use crate::server::{app_state::AppState, http_errors::generic_internal_server_error};
use actix_web::{HttpResponse, HttpResponseBuilder, cookie::Cookie, web};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninBody {
    pub email: String,
    pub password: String,
}

/// POST /api/signin
pub async fn security_signin(
    state: web::Data<AppState>,
    body: web::Json<SigninBody>,
) -> HttpResponse {
    match state
        .api
        .security()
        .signin(&body.email, &body.password)
        .await
    {
        Ok(Some((_, access_token))) => {
            access_token_response(&state, access_token, HttpResponse::Ok())
        }
        Ok(None) => {
            HttpResponse::Unauthorized().json(json!({ "message": "Invalid email or password." }))
        }
        Err(err) => {
            error!("Failed to sign user in: {err:?}");
            generic_internal_server_error()
        }
    }
}

/// Returns the access token both in the response body and as an HttpOnly
/// session cookie, so both API and browser clients can pick it up.
pub(super) fn access_token_response(
    state: &AppState,
    access_token: String,
    mut response: HttpResponseBuilder,
) -> HttpResponse {
    let cookie = Cookie::build(
        state.config.security.session_cookie_name.clone(),
        access_token.clone(),
    )
    .path("/")
    .http_only(true)
    .finish();

    response
        .cookie(cookie)
        .json(json!({ "accessToken": access_token }))
}
