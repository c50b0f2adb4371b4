//! User accounts

mod file_store;
mod model;

pub use file_store::{FileUserStore, UserRepository};
pub use model::UserAccount;
