//! Accounts, password hashing and bearer tokens

mod password;
mod service;

pub use service::{AuthError, AuthService};
