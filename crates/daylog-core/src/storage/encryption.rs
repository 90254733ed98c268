//! Age passphrase encryption for the journal file.
//!
//! The whole serialized database is one age payload, so entry content is
//! never written to disk in plaintext. Age derives the file key with scrypt.

use std::io::{Read, Write};
use std::iter;

use age::secrecy::SecretString;

use crate::error::{DaylogError, Result};

/// Encrypt `data` for the given passphrase.
///
/// # Examples
///
/// ```
/// use daylog_core::storage::encryption::encrypt;
///
/// let sealed = encrypt(b"buy bread", "morning-pages-2024").unwrap();
/// assert_ne!(sealed.as_slice(), b"buy bread");
/// ```
pub fn encrypt(data: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    let encryptor =
        age::Encryptor::with_user_passphrase(SecretString::from(passphrase.to_string()));

    let mut encrypted = Vec::new();
    let mut writer = encryptor
        .wrap_output(&mut encrypted)
        .map_err(|e| DaylogError::Crypto(format!("Failed to create encryptor: {}", e)))?;
    writer
        .write_all(data)
        .map_err(|e| DaylogError::Crypto(format!("Encryption write failed: {}", e)))?;
    writer
        .finish()
        .map_err(|e| DaylogError::Crypto(format!("Encryption finish failed: {}", e)))?;

    Ok(encrypted)
}

/// Decrypt an age payload produced by [`encrypt`].
///
/// # Errors
///
/// Returns `DaylogError::IncorrectPassphrase` when the passphrase does not
/// unlock the file, and `DaylogError::Crypto` for malformed or truncated data.
pub fn decrypt(encrypted_data: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    let decryptor = age::Decryptor::new(encrypted_data)
        .map_err(|e| DaylogError::Crypto(format!("Failed to create decryptor: {}", e)))?;

    let identity = age::scrypt::Identity::new(SecretString::from(passphrase.to_string()));
    let mut reader = decryptor
        .decrypt(iter::once(&identity as &dyn age::Identity))
        .map_err(|e| match e {
            age::DecryptError::NoMatchingKeys
            | age::DecryptError::DecryptionFailed
            | age::DecryptError::KeyDecryptionFailed => DaylogError::IncorrectPassphrase,
            _ => DaylogError::Crypto(format!("Decryption failed: {}", e)),
        })?;

    let mut decrypted = Vec::new();
    reader
        .read_to_end(&mut decrypted)
        .map_err(|e| DaylogError::Crypto(format!("Failed to read decrypted data: {}", e)))?;

    Ok(decrypted)
}
