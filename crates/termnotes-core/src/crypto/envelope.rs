//! AES-256-GCM envelopes for note content.
//!
//! An envelope is stored as JSON of byte arrays:
//!
//! ```text
//! {"iv":[12 bytes],"data":[ciphertext || 16-byte tag]}
//! ```
//!
//! Values that are not JSON objects carrying both `iv` and `data` are legacy
//! plaintext written before content was encrypted. An object that carries
//! both fields but with unusable values is a corrupted envelope.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use serde::{Deserialize, Serialize};

use super::key::NoteKey;
use crate::error::{NotesError, Result};

/// Nonce length in bytes (96 bits).
pub const NONCE_LENGTH: usize = 12;

/// A nonce plus AEAD ciphertext, produced by one encryption call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub iv: Vec<u8>,
    pub data: Vec<u8>,
}

impl Envelope {
    /// Parse a stored value. Returns `Ok(None)` when the value is not an envelope.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::Crypto` if both envelope fields are present but
    /// do not hold byte arrays.
    pub fn parse(stored: &str) -> Result<Option<Self>> {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(stored) else {
            return Ok(None);
        };
        // serde would also accept a two-element array for a struct; only objects are envelopes
        let Some(fields) = value.as_object() else {
            return Ok(None);
        };
        let present = |key: &str| fields.get(key).is_some_and(|v| !v.is_null());
        if !present("iv") || !present("data") {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| NotesError::Crypto(format!("Malformed envelope: {}", e)))
    }

    /// Serialize to the stored string form.
    pub fn to_stored(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Result of opening a stored content value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plaintext {
    /// The value was an envelope and authenticated under the store key.
    Decrypted(String),
    /// The value was not an envelope and is returned unchanged.
    Legacy(String),
}

impl Plaintext {
    pub fn is_legacy(&self) -> bool {
        matches!(self, Plaintext::Legacy(_))
    }

    pub fn into_string(self) -> String {
        match self {
            Plaintext::Decrypted(text) | Plaintext::Legacy(text) => text,
        }
    }
}

/// AES-256-GCM cipher bound to one note key.
pub struct NoteCipher {
    cipher: Aes256Gcm,
}

impl NoteCipher {
    pub fn new(key: &NoteKey) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(key.as_bytes());
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// Encrypt under a freshly drawn random nonce.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Envelope> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let data = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| NotesError::Crypto(format!("Encryption failed: {}", e)))?;
        Ok(Envelope {
            iv: nonce.to_vec(),
            data,
        })
    }

    /// Authenticate and decrypt an envelope.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::Crypto` if the nonce has the wrong length or the
    /// tag does not verify (wrong key, corrupted or tampered data).
    pub fn open(&self, envelope: &Envelope) -> Result<Vec<u8>> {
        if envelope.iv.len() != NONCE_LENGTH {
            return Err(NotesError::Crypto(format!(
                "Envelope nonce must be {} bytes (got {})",
                NONCE_LENGTH,
                envelope.iv.len()
            )));
        }
        let nonce = Nonce::from_slice(&envelope.iv);
        self.cipher
            .decrypt(nonce, envelope.data.as_slice())
            .map_err(|_| NotesError::Crypto("Envelope failed authentication".to_string()))
    }

    /// Encrypt text and return the stored envelope string.
    pub fn encrypt_text(&self, plaintext: &str) -> Result<String> {
        self.seal(plaintext.as_bytes())?.to_stored()
    }

    /// Open a stored value, falling back to legacy plaintext when it is not an envelope.
    pub fn decrypt_text(&self, stored: &str) -> Result<Plaintext> {
        let Some(envelope) = Envelope::parse(stored)? else {
            return Ok(Plaintext::Legacy(stored.to_string()));
        };
        let bytes = self.open(&envelope)?;
        let text = String::from_utf8(bytes)
            .map_err(|_| NotesError::Crypto("Decrypted content is not UTF-8".to_string()))?;
        Ok(Plaintext::Decrypted(text))
    }
}
