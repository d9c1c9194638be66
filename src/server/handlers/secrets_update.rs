use crate::{
    secrets::SecretPayload,
    server::{
        app_state::AppState, handlers::secrets_create::SecretPayloadBody,
        http_errors::secrets_error_response,
    },
    users::User,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct SecretIdPath {
    pub secret_id: Uuid,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSecretBody {
    pub description: String,
    pub payload: SecretPayloadBody,
}

/// PATCH /api/secrets/{secret_id}
pub async fn secrets_update(
    state: web::Data<AppState>,
    user: User,
    path: web::Path<SecretIdPath>,
    body: web::Json<UpdateSecretBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let payload = SecretPayload::from(body.payload);

    let secrets_api = state.api.secrets(&user);
    let secret = match secrets_api.find_secret(path.secret_id).await {
        Ok(secret) => secret,
        Err(err) => return secrets_error_response(err),
    };

    match secrets_api
        .update_secret(&secret, &body.description, &payload)
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => secrets_error_response(err),
    }
}
