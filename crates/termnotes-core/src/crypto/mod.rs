//! Cryptographic operations for termnotes.
//!
//! Note content is encrypted with AES-256-GCM under a single store key:
//! - **key**: key generation and the exported (JWK-style) form
//! - **envelope**: nonce + ciphertext envelopes and the legacy-plaintext fallback
//! - **keystore**: where the exported key lives (key file or memory)
//! - **provider**: lazy, exactly-once key initialization
//!
//! ## Threat Model
//!
//! The key is generated randomly and stored unprotected next to the data.
//! This defends against casual inspection of the database file only.
//!
//! We do NOT defend against:
//! - Anyone who can read both the database and the key file
//! - Compromised OS / access to process memory

pub mod envelope;
pub mod key;
pub mod keystore;
pub mod provider;

pub use envelope::{Envelope, NoteCipher, Plaintext, NONCE_LENGTH};
pub use key::{NoteKey, KEY_LENGTH};
pub use keystore::{FileKeyStore, KeyStore, MemoryKeyStore};
pub use provider::CryptoProvider;
