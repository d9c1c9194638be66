use crate::secrets::SecretsError;
use anyhow::{Context, bail};
use openssl::symm::{Cipher, Crypter, Mode};
use std::sync::Arc;
use zeroize::Zeroizing;

/// AES-GCM nonce size in bytes.
const NONCE_SIZE: usize = 12;
/// AES-GCM authentication tag size in bytes.
const TAG_SIZE: usize = 16;

/// Source of cryptographically secure random bytes. Injected into the
/// encryptor so deterministic tests can supply fixed byte sequences. Must
/// be safe for concurrent use.
pub trait RandomSource: Send + Sync {
    /// Fills `dest` with random bytes.
    fn fill(&self, dest: &mut [u8]) -> anyhow::Result<()>;
}

/// Operating system RNG exposed through OpenSSL.
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn fill(&self, dest: &mut [u8]) -> anyhow::Result<()> {
        openssl::rand::rand_bytes(dest).with_context(|| "Failed to generate random bytes.")
    }
}

/// Two-tier (envelope) AES-GCM encryption. Every secret gets its own
/// random data key sized to match the master key, and only the wrapped
/// (master-key encrypted) form of that key ever leaves this type. The
/// master key itself is held here exclusively for the process lifetime and
/// is never persisted; losing it makes every wrapped key unrecoverable.
///
/// Both tiers use the same construction: `nonce || ciphertext || tag` with
/// a fresh random nonce per encryption and no associated data.
#[derive(Clone)]
pub struct EnvelopeEncryptor {
    master_key: Zeroizing<Vec<u8>>,
    random: Arc<dyn RandomSource>,
}

impl EnvelopeEncryptor {
    /// Creates a new instance from a raw master key. The key must be 16,
    /// 24, or 32 bytes (AES-128/192/256); anything else is rejected here,
    /// at construction time, not when the encryptor is first used.
    pub fn new(master_key: Vec<u8>, random: Arc<dyn RandomSource>) -> anyhow::Result<Self> {
        if cipher_for_key(master_key.len()).is_none() {
            bail!(
                "Master key must be 16, 24, or 32 bytes, got {} bytes.",
                master_key.len()
            );
        }

        Ok(Self {
            master_key: Zeroizing::new(master_key),
            random,
        })
    }

    /// Encrypts `plaintext` under a fresh random data key and returns the
    /// ciphertext together with the data key wrapped under the master key.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<(Vec<u8>, Vec<u8>), SecretsError> {
        let mut data_key = Zeroizing::new(vec![0u8; self.master_key.len()]);
        self.random
            .fill(&mut data_key)
            .map_err(SecretsError::crypto)?;

        let ciphertext = self.seal(&data_key, plaintext).map_err(SecretsError::crypto)?;
        let wrapped_key = self
            .seal(&self.master_key, &data_key)
            .map_err(SecretsError::crypto)?;

        Ok((ciphertext, wrapped_key))
    }

    /// Unwraps the data key with the master key, then decrypts
    /// `ciphertext` with it. Fails if either authentication tag check
    /// fails, which signals tampering, corruption, or a wrong key.
    pub fn decrypt(&self, ciphertext: &[u8], wrapped_key: &[u8]) -> Result<Vec<u8>, SecretsError> {
        let data_key = Zeroizing::new(
            Self::open(&self.master_key, wrapped_key).map_err(SecretsError::crypto)?,
        );

        Self::open(&data_key, ciphertext).map_err(SecretsError::crypto)
    }

    /// Re-encrypts `plaintext` under the existing data key recovered from
    /// `wrapped_key` and returns only the new ciphertext. The wrapped key
    /// is deliberately not re-issued so the stored copy never has to
    /// change on update.
    pub fn re_encrypt(
        &self,
        plaintext: &[u8],
        wrapped_key: &[u8],
    ) -> Result<Vec<u8>, SecretsError> {
        let data_key = Zeroizing::new(
            Self::open(&self.master_key, wrapped_key).map_err(SecretsError::crypto)?,
        );

        self.seal(&data_key, plaintext).map_err(SecretsError::crypto)
    }

    /// Encrypts plaintext with a fresh random nonce.
    /// Returns `nonce || ciphertext || tag`.
    fn seal(&self, key: &[u8], plaintext: &[u8]) -> anyhow::Result<Vec<u8>> {
        let cipher = cipher_for_key(key.len())
            .ok_or_else(|| anyhow::anyhow!("Invalid AES key length: {} bytes.", key.len()))?;
        let mut nonce = [0u8; NONCE_SIZE];
        self.random.fill(&mut nonce)?;

        let mut crypter = Crypter::new(cipher, Mode::Encrypt, key, Some(&nonce))?;
        let mut ciphertext = vec![0u8; plaintext.len() + cipher.block_size()];
        let mut count = crypter.update(plaintext, &mut ciphertext)?;
        count += crypter.finalize(&mut ciphertext[count..])?;
        ciphertext.truncate(count);

        let mut tag = vec![0u8; TAG_SIZE];
        crypter.get_tag(&mut tag)?;

        let mut output = Vec::with_capacity(NONCE_SIZE + ciphertext.len() + TAG_SIZE);
        output.extend_from_slice(&nonce);
        output.extend_from_slice(&ciphertext);
        output.extend_from_slice(&tag);

        Ok(output)
    }

    /// Decrypts data previously produced by [`Self::seal`]. Expects
    /// `nonce || ciphertext || tag`.
    fn open(key: &[u8], data: &[u8]) -> anyhow::Result<Vec<u8>> {
        if data.len() < NONCE_SIZE + TAG_SIZE {
            bail!("Encrypted data is too short to contain nonce and tag.");
        }

        let cipher = cipher_for_key(key.len())
            .ok_or_else(|| anyhow::anyhow!("Invalid AES key length: {} bytes.", key.len()))?;
        let nonce = &data[..NONCE_SIZE];
        let tag = &data[data.len() - TAG_SIZE..];
        let ciphertext = &data[NONCE_SIZE..data.len() - TAG_SIZE];

        let mut crypter = Crypter::new(cipher, Mode::Decrypt, key, Some(nonce))?;
        crypter.set_tag(tag)?;

        let mut plaintext = vec![0u8; ciphertext.len() + cipher.block_size()];
        let mut count = crypter.update(ciphertext, &mut plaintext)?;
        count += crypter.finalize(&mut plaintext[count..])?;
        plaintext.truncate(count);

        Ok(plaintext)
    }
}

fn cipher_for_key(len: usize) -> Option<Cipher> {
    match len {
        16 => Some(Cipher::aes_128_gcm()),
        24 => Some(Cipher::aes_192_gcm()),
        32 => Some(Cipher::aes_256_gcm()),
        _ => None,
    }
}
