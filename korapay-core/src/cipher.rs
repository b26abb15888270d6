//! AES-GCM encryption of card payloads.
//!
//! Korapay requires card details to be encrypted with the merchant's
//! encryption key before they are sent, independently of TLS. The output is
//! `hex(iv):hex(ciphertext):hex(tag)` and is only ever decrypted by the API.

use std::fmt::Debug;

use aes_gcm::{
    AesGcm, KeyInit, Nonce,
    aead::{Aead, consts::U16},
    aes::{Aes128, Aes192, Aes256},
};
use serde::Serialize;

use crate::errors::{Error, Result};

/// Length in bytes of the initialization vector generated for every payload.
pub const IV_LENGTH: usize = 16;

/// Length in bytes of the GCM authentication tag.
pub const TAG_LENGTH: usize = 16;

type Aes128Gcm16 = AesGcm<Aes128, U16>;
type Aes192Gcm16 = AesGcm<Aes192, U16>;
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Encrypts JSON-serializable payloads with the merchant encryption key.
///
/// The key is used as raw bytes, no key derivation is applied. A 16 byte key
/// selects AES-128, a 24 byte key AES-192 and a 32 byte key AES-256. The key
/// length is checked on every [`PayloadCipher::encrypt`] call rather than at
/// construction.
#[derive(Clone, PartialEq, Eq)]
pub struct PayloadCipher {
    key: Vec<u8>,
}

impl Debug for PayloadCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadCipher")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl PayloadCipher {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        PayloadCipher { key: key.into() }
    }

    /// Serialize `payload` to JSON and encrypt it.
    ///
    /// A fresh random IV is drawn for every call, so encrypting the same payload
    /// twice yields two different envelopes.
    pub fn encrypt<T: Serialize + ?Sized>(&self, payload: &T) -> Result<String> {
        let plaintext = serde_json::to_string(payload).map_err(|err| {
            Error::cipher("serialization", format!("failed to serialize payload: {err}"))
        })?;

        let iv: [u8; IV_LENGTH] = rand::random();
        let sealed = seal(&self.key, &iv, plaintext.as_bytes())?;

        // GCM output is `ciphertext || tag`.
        let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LENGTH);

        Ok(format!(
            "{}:{}:{}",
            hex::encode(iv),
            hex::encode(ciphertext),
            hex::encode(tag)
        ))
    }
}

fn seal(key: &[u8], iv: &[u8; IV_LENGTH], plaintext: &[u8]) -> Result<Vec<u8>> {
    let nonce = Nonce::<U16>::from_slice(iv);
    let sealed = match key.len() {
        16 => Aes128Gcm16::new_from_slice(key)
            .map_err(|_| invalid_key_length(key.len()))?
            .encrypt(nonce, plaintext),
        24 => Aes192Gcm16::new_from_slice(key)
            .map_err(|_| invalid_key_length(key.len()))?
            .encrypt(nonce, plaintext),
        32 => Aes256Gcm16::new_from_slice(key)
            .map_err(|_| invalid_key_length(key.len()))?
            .encrypt(nonce, plaintext),
        len => return Err(invalid_key_length(len)),
    };

    sealed.map_err(|_| Error::cipher("encryption", "AES-GCM encryption failed"))
}

fn invalid_key_length(len: usize) -> Error {
    Error::cipher(
        "invalid_key_length",
        format!("encryption key must be 16, 24 or 32 bytes long, got {len}"),
    )
}
