use crate::{
    api::Api,
    database::Database,
    secrets::{
        EnvelopeEncryptor, Secret, SecretPayload, SecretsError, SecretsStorage,
        export::{self, BinaryEntry, CredentialsEntry, CreditCardEntry},
    },
    users::User,
};
use uuid::Uuid;

/// User-scoped facade over the secrets engine. The operations are
/// stateless: every call re-checks ownership against the user it was
/// created for, and a failure at any step leaves storage untouched.
pub struct SecretsApiExt<'a, 'u, S: SecretsStorage> {
    storage: &'a S,
    encryptor: &'a EnvelopeEncryptor,
    user: &'u User,
}

impl<'a, 'u, S: SecretsStorage> SecretsApiExt<'a, 'u, S> {
    pub fn new(storage: &'a S, encryptor: &'a EnvelopeEncryptor, user: &'u User) -> Self {
        Self {
            storage,
            encryptor,
            user,
        }
    }

    /// Creates a new secret owned by the user: the payload is marshalled,
    /// encrypted under a fresh data key, and persisted together with the
    /// wrapped form of that key in a single storage call.
    pub async fn create_secret(
        &self,
        description: &str,
        payload: &SecretPayload,
    ) -> Result<Secret, SecretsError> {
        let payload_bytes = payload.marshal()?;
        let (encrypted_data, encrypted_key) = self.encryptor.encrypt(&payload_bytes)?;

        self.storage
            .create_secret(
                self.user.id,
                payload.secret_type(),
                description,
                &encrypted_data,
                &encrypted_key,
            )
            .await
    }

    /// Looks a secret up by id. This is a plain lookup; ownership is
    /// enforced by the mutating operations that consume the record.
    pub async fn find_secret(&self, id: Uuid) -> Result<Secret, SecretsError> {
        self.storage.find_secret_by_id(id).await
    }

    /// Replaces a secret's payload and description in place. Ownership and
    /// type checks run strictly before any codec or cryptographic work.
    /// The payload is re-encrypted under the secret's existing data key,
    /// recovered from the wrapped key on the validated record itself, so
    /// the stored wrapped key never changes.
    pub async fn update_secret(
        &self,
        secret: &Secret,
        new_description: &str,
        new_payload: &SecretPayload,
    ) -> Result<(), SecretsError> {
        if self.user.id != secret.user_id {
            return Err(SecretsError::NoPermission {
                user_id: self.user.id,
                secret_id: secret.id,
            });
        }

        if new_payload.secret_type() != secret.secret_type {
            return Err(SecretsError::TypeChangeForbidden);
        }

        let payload_bytes = new_payload.marshal()?;
        let encrypted_data = self
            .encryptor
            .re_encrypt(&payload_bytes, &secret.encrypted_key)?;

        self.storage
            .update_secret(secret.id, new_description, &encrypted_data)
            .await
    }

    /// Removes a secret after verifying ownership. Nothing is decrypted.
    pub async fn delete_secret(&self, secret: &Secret) -> Result<(), SecretsError> {
        if self.user.id != secret.user_id {
            return Err(SecretsError::NoPermission {
                user_id: self.user.id,
                secret_id: secret.id,
            });
        }

        self.storage.delete_secret(secret.id).await
    }

    /// Decrypts all of the user's secrets and packages them into a single
    /// zip archive: one JSON document per non-empty structured group and
    /// one entry per binary secret. Any decryption, decoding, or archive
    /// failure aborts the whole export; a partial archive is never
    /// returned.
    pub async fn export_secrets(&self) -> Result<Vec<u8>, SecretsError> {
        let secrets = self.storage.list_user_secrets(self.user.id).await?;

        let mut credentials = Vec::new();
        let mut credit_cards = Vec::new();
        let mut binary_data = Vec::new();
        for secret in &secrets {
            match self.decrypt_payload(secret)? {
                SecretPayload::Credentials(creds) => credentials.push(CredentialsEntry {
                    id: secret.id,
                    description: secret.description.clone(),
                    login: creds.login,
                    password: creds.password,
                }),
                SecretPayload::CreditCard(card) => credit_cards.push(CreditCardEntry {
                    id: secret.id,
                    description: secret.description.clone(),
                    number: card.number,
                    holder_name: card.holder_name,
                    expiry_date: card.expiry_date,
                    cvv: card.cvv,
                }),
                SecretPayload::BinaryData(data) => binary_data.push(BinaryEntry {
                    id: secret.id,
                    filename: data.filename,
                    bytes: data.bytes,
                }),
            }
        }

        export::build_archive(&credentials, &credit_cards, &binary_data)
    }

    fn decrypt_payload(&self, secret: &Secret) -> Result<SecretPayload, SecretsError> {
        let payload_bytes = self
            .encryptor
            .decrypt(&secret.encrypted_data, &secret.encrypted_key)?;

        SecretPayload::unmarshal(secret.secret_type, &payload_bytes)
    }
}

impl Api {
    /// Returns an API to work with the user's secrets.
    pub fn secrets<'a, 'u>(&'a self, user: &'u User) -> SecretsApiExt<'a, 'u, Database> {
        SecretsApiExt::new(&self.db, &self.encryptor, user)
    }
}
