//! The note encryption key and its exported form.
//!
//! The key is exported as a JWK-style JSON object so that it can be written
//! to disk and re-imported later:
//!
//! ```text
//! {"kty":"oct","alg":"A256GCM","k":"<base64url>","ext":true,"key_ops":["encrypt","decrypt"]}
//! ```

use aes_gcm::aead::{KeyInit, OsRng};
use aes_gcm::Aes256Gcm;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{NotesError, Result};

/// Length of the key in bytes (32 bytes = 256 bits for AES-256-GCM).
pub const KEY_LENGTH: usize = 32;

const KEY_TYPE: &str = "oct";
const KEY_ALGORITHM: &str = "A256GCM";

/// A 256-bit symmetric key for note content.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct NoteKey {
    key: [u8; KEY_LENGTH],
}

#[derive(Serialize, Deserialize)]
struct ExportedKey {
    kty: String,
    alg: String,
    k: String,
    #[serde(default)]
    ext: bool,
    #[serde(default)]
    key_ops: Vec<String>,
}

impl Drop for ExportedKey {
    fn drop(&mut self) {
        self.k.zeroize();
    }
}

impl NoteKey {
    /// Generate a fresh random key from the OS RNG.
    pub fn generate() -> Self {
        let mut generated = Aes256Gcm::generate_key(&mut OsRng);
        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(generated.as_slice());
        generated.as_mut_slice().zeroize();
        Self { key }
    }

    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Raw key bytes. Avoid storing or logging this value.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }

    /// Serialize the key to its exported JWK form.
    pub fn export(&self) -> Result<Zeroizing<String>> {
        let exported = ExportedKey {
            kty: KEY_TYPE.to_string(),
            alg: KEY_ALGORITHM.to_string(),
            k: URL_SAFE_NO_PAD.encode(self.key),
            ext: true,
            key_ops: vec!["encrypt".to_string(), "decrypt".to_string()],
        };
        Ok(Zeroizing::new(serde_json::to_string(&exported)?))
    }

    /// Parse a key previously produced by [`NoteKey::export`].
    pub fn import(exported: &str) -> Result<Self> {
        let parsed: ExportedKey = serde_json::from_str(exported)
            .map_err(|e| NotesError::Crypto(format!("Invalid key material: {}", e)))?;
        if parsed.kty != KEY_TYPE {
            return Err(NotesError::Crypto(format!(
                "Unsupported key type: {}",
                parsed.kty
            )));
        }
        if parsed.alg != KEY_ALGORITHM {
            return Err(NotesError::Crypto(format!(
                "Unsupported key algorithm: {}",
                parsed.alg
            )));
        }

        let decoded = Zeroizing::new(
            URL_SAFE_NO_PAD
                .decode(parsed.k.as_bytes())
                .map_err(|e| NotesError::Crypto(format!("Invalid key encoding: {}", e)))?,
        );
        if decoded.len() != KEY_LENGTH {
            return Err(NotesError::Crypto(format!(
                "Key must be {} bytes (got {})",
                KEY_LENGTH,
                decoded.len()
            )));
        }

        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(&decoded);
        Ok(Self::from_bytes(key))
    }
}

impl std::fmt::Debug for NoteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_differ() {
        let key1 = NoteKey::generate();
        let key2 = NoteKey::generate();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_export_import_preserves_key() {
        let key = NoteKey::generate();
        let exported = key.export().unwrap();
        assert!(exported.contains("\"kty\":\"oct\""));
        assert!(exported.contains("\"alg\":\"A256GCM\""));

        let imported = NoteKey::import(&exported).unwrap();
        assert_eq!(key.as_bytes(), imported.as_bytes());
    }

    #[test]
    fn test_import_rejects_wrong_length() {
        let short = format!(
            r#"{{"kty":"oct","alg":"A256GCM","k":"{}"}}"#,
            URL_SAFE_NO_PAD.encode([7u8; 16])
        );
        let err = NoteKey::import(&short).unwrap_err();
        assert!(err.to_string().contains("Key must be 32 bytes"));
    }

    #[test]
    fn test_import_rejects_other_algorithms() {
        let rsa = r#"{"kty":"RSA","alg":"RS256","k":"AAAA"}"#;
        assert!(matches!(NoteKey::import(rsa), Err(NotesError::Crypto(_))));
        assert!(matches!(NoteKey::import("not json"), Err(NotesError::Crypto(_))));
    }

    #[test]
    fn test_debug_redacts() {
        let key = NoteKey::generate();
        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
