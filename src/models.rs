//! Data models for the password store.

use crate::crypto::{self, TOKEN_LEN};
use crate::error::{Result, StoreError};
use crate::sequence::NodeId;
use std::fmt;
use std::rc::Rc;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The 3-byte key a secret is obscured with.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Token([u8; TOKEN_LEN]);

impl Token {
    /// Get the raw token bytes.
    pub fn as_bytes(&self) -> &[u8; TOKEN_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Token {
    type Error = StoreError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let array: [u8; TOKEN_LEN] = bytes
            .try_into()
            .map_err(|_| StoreError::InvalidToken {
                length: bytes.len(),
            })?;
        Ok(Self(array))
    }
}

impl TryFrom<&str> for Token {
    type Error = StoreError;

    fn try_from(text: &str) -> Result<Self> {
        Self::try_from(text.as_bytes())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// A single password entry.
///
/// Created once when it is added to the store and never modified afterwards.
/// The obscured secret and token are wiped when the last handle is dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Record {
    key: String,
    secret: Vec<u8>,
    token: Token,
}

impl Record {
    /// Obscure `plaintext` with `token` and wrap it with its lookup key.
    pub fn new(key: impl Into<String>, plaintext: &str, token: Token) -> Self {
        let secret = crypto::encode(plaintext.as_bytes(), token.as_bytes());
        Self {
            key: key.into(),
            secret,
            token,
        }
    }

    /// Site name the record is indexed by.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Obscured secret bytes.
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Recover the plaintext using a caller-supplied candidate token.
    pub fn reveal(&self, candidate: &str) -> Result<String> {
        let plaintext =
            crypto::decode_checked(&self.secret, self.token.as_bytes(), candidate.as_bytes())?;
        Ok(String::from_utf8(plaintext)?)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("key", &self.key)
            .field("secret_len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

/// A record handle as held by the keyed index: the shared record plus the
/// position of that same record in the ordered sequence.
#[derive(Debug, Clone)]
pub struct RecordRef {
    pub node: NodeId,
    pub record: Rc<Record>,
}

impl RecordRef {
    pub fn key(&self) -> &str {
        self.record.key()
    }
}
