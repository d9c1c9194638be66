mod api_ext;
mod database_ext;
mod encryption;
mod error;
mod export;
mod payload;
mod secret;
mod secret_type;
mod storage;

pub use self::{
    encryption::{EnvelopeEncryptor, SystemRandom},
    error::SecretsError,
    payload::{BinaryData, CreditCard, Credentials, SecretPayload},
    secret::Secret,
    secret_type::SecretType,
    storage::SecretsStorage,
};
