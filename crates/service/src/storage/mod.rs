pub mod token_file;

pub use token_file::{JsonTokenStore, TokenStore};
