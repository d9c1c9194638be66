use crate::{
    secrets::{BinaryData, CreditCard, Credentials, SecretPayload},
    server::{app_state::AppState, http_errors::secrets_error_response},
    users::User,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use time::OffsetDateTime;

/// Payload fields accepted by the create and update endpoints. Binary
/// bytes travel base64-encoded.
#[derive(Deserialize)]
#[serde(tag = "secretType", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SecretPayloadBody {
    Credentials {
        login: String,
        password: String,
    },
    CreditCard {
        number: String,
        holder_name: String,
        #[serde(with = "time::serde::rfc3339")]
        expiry_date: OffsetDateTime,
        cvv: String,
    },
    BinaryData {
        #[serde(default)]
        filename: Option<String>,
        #[serde(with = "base64_bytes")]
        data: Vec<u8>,
    },
}

impl From<SecretPayloadBody> for SecretPayload {
    fn from(body: SecretPayloadBody) -> Self {
        match body {
            SecretPayloadBody::Credentials { login, password } => {
                SecretPayload::Credentials(Credentials { login, password })
            }
            SecretPayloadBody::CreditCard {
                number,
                holder_name,
                expiry_date,
                cvv,
            } => SecretPayload::CreditCard(CreditCard {
                number,
                holder_name,
                expiry_date,
                cvv,
            }),
            SecretPayloadBody::BinaryData { filename, data } => {
                SecretPayload::BinaryData(BinaryData {
                    filename,
                    bytes: data,
                })
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSecretBody {
    pub description: String,
    pub payload: SecretPayloadBody,
}

/// POST /api/secrets
pub async fn secrets_create(
    state: web::Data<AppState>,
    user: User,
    body: web::Json<CreateSecretBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let payload = SecretPayload::from(body.payload);
    match state
        .api
        .secrets(&user)
        .create_secret(&body.description, &payload)
        .await
    {
        Ok(secret) => HttpResponse::Created().json(secret),
        Err(err) => secrets_error_response(err),
    }
}

mod base64_bytes {
    use base64::prelude::{BASE64_STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64_STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}
