use crate::{config::Config, database::Database, secrets::EnvelopeEncryptor};

#[derive(Clone)]
pub struct Api {
    pub config: Config,
    pub db: Database,
    pub encryptor: EnvelopeEncryptor,
}

impl Api {
    /// Instantiates APIs collection with the specified config, database,
    /// and envelope encryptor. The encryptor is constructed once at
    /// startup and owns the master key for the process lifetime.
    pub fn new(config: Config, db: Database, encryptor: EnvelopeEncryptor) -> Self {
        Self {
            config,
            db,
            encryptor,
        }
    }
}

impl AsRef<Api> for Api {
    fn as_ref(&self) -> &Self {
        self
    }
}
