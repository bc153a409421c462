//! Lazily-initialized crypto provider bound to a key store.

use std::sync::{Arc, Mutex};

use log::{debug, info};

use super::envelope::{Envelope, NoteCipher, Plaintext};
use super::key::NoteKey;
use super::keystore::KeyStore;
use crate::error::{NotesError, Result};

/// Owns the note key for one store and encrypts/decrypts content with it.
///
/// The key is created on first use. Initialization is serialized by a mutex
/// and the key store only ever accepts one key, so concurrent first callers
/// all end up with the same persisted key.
pub struct CryptoProvider {
    keys: Box<dyn KeyStore>,
    cipher: Mutex<Option<Arc<NoteCipher>>>,
}

impl CryptoProvider {
    pub fn new(keys: impl KeyStore + 'static) -> Self {
        Self {
            keys: Box::new(keys),
            cipher: Mutex::new(None),
        }
    }

    /// Load the persisted key, generating and persisting one if none exists.
    pub fn ensure_key(&self) -> Result<Arc<NoteCipher>> {
        let mut slot = self
            .cipher
            .lock()
            .map_err(|_| NotesError::Crypto("Key initialization poisoned".to_string()))?;
        if let Some(cipher) = slot.as_ref() {
            return Ok(Arc::clone(cipher));
        }

        let key = match self.keys.load()? {
            Some(exported) => NoteKey::import(&exported)?,
            None => {
                let generated = NoteKey::generate();
                let exported = generated.export()?;
                if self.keys.store_if_absent(&exported)? {
                    info!("Generated new note encryption key");
                    generated
                } else {
                    // Another process persisted a key between load and store.
                    let existing = self.keys.load()?.ok_or_else(|| {
                        NotesError::Crypto("Key store reported a key but none was found".into())
                    })?;
                    NoteKey::import(&existing)?
                }
            }
        };

        let cipher = Arc::new(NoteCipher::new(&key));
        *slot = Some(Arc::clone(&cipher));
        Ok(cipher)
    }

    /// Encrypt text into a stored envelope string.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        self.ensure_key()?.encrypt_text(plaintext)
    }

    /// Decrypt a stored value; non-envelope input comes back as legacy plaintext.
    pub fn decrypt(&self, stored: &str) -> Result<Plaintext> {
        if Envelope::parse(stored)?.is_none() {
            debug!("Content is not an envelope; treating as legacy plaintext");
            return Ok(Plaintext::Legacy(stored.to_string()));
        }
        self.ensure_key()?.decrypt_text(stored)
    }
}
