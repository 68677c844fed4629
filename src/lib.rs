//! pwstore: an in-memory password store indexed by insertion order and by site.

pub mod cli;
pub mod crypto;
pub mod error;
pub mod history;
pub mod index;
pub mod interactive;
pub mod logging;
pub mod models;
pub mod security;
pub mod sequence;
pub mod service;
pub mod sorting;
pub mod utils;

// Re-export commonly used types
pub use error::{Result, StoreError};
pub use models::{Record, Token};
pub use security::{AuthorizationGate, PinGate};
pub use service::{Insertion, PasswordStore};
pub use sorting::SortAlgorithm;
