use crate::secrets::{SecretType, SecretsError};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Login/password pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// Payment card record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreditCard {
    pub number: String,
    pub holder_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expiry_date: OffsetDateTime,
    pub cvv: String,
}

/// Opaque user-provided blob with the original file name, if one is known.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BinaryData {
    pub filename: Option<String>,
    #[serde(with = "serde_bytes")]
    pub bytes: Vec<u8>,
}

/// Sum of all payload kinds a secret can hold. The variant must always
/// agree with the `SecretType` stored on the owning record: creation
/// derives the type from the variant, and updates reject a variant switch.
///
/// Serialized with postcard (the main serialization format for opaque
/// stored values), so the byte form is compact and stable as long as the
/// field order stays fixed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum SecretPayload {
    Credentials(Credentials),
    CreditCard(CreditCard),
    BinaryData(BinaryData),
}

impl SecretPayload {
    /// Returns the discriminator matching this payload variant.
    pub fn secret_type(&self) -> SecretType {
        match self {
            SecretPayload::Credentials(_) => SecretType::Credentials,
            SecretPayload::CreditCard(_) => SecretType::CreditCard,
            SecretPayload::BinaryData(_) => SecretType::BinaryData,
        }
    }

    /// Serializes the payload to the byte form that gets encrypted and
    /// persisted.
    pub fn marshal(&self) -> Result<Vec<u8>, SecretsError> {
        postcard::to_stdvec(self).map_err(SecretsError::codec)
    }

    /// Deserializes payload bytes for a secret of the given type. Bytes
    /// that do not decode, or that decode to a different variant than the
    /// stored discriminator, are a codec error.
    pub fn unmarshal(secret_type: SecretType, bytes: &[u8]) -> Result<Self, SecretsError> {
        let payload = postcard::from_bytes::<Self>(bytes).map_err(SecretsError::codec)?;
        if payload.secret_type() != secret_type {
            return Err(SecretsError::codec(anyhow::anyhow!(
                "Payload bytes decode to {} instead of {}.",
                payload.secret_type(),
                secret_type
            )));
        }

        Ok(payload)
    }
}
