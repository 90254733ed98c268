//! Passphrase handling for the encrypted journal file.
//!
//! Encryption itself lives in [`crate::storage::encryption`] and uses age's
//! scrypt passphrase recipient.

pub mod passphrase;

pub use passphrase::validate_passphrase;
