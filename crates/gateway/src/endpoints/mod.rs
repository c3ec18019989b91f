//! # Gatewayエンドポイント

pub mod health;
pub mod sign_auth_entry;
pub mod sign_transaction;
pub mod stellar_toml;

pub use health::handle_health;
pub use sign_auth_entry::handle_sign_auth_entry;
pub use sign_transaction::handle_sign_transaction;
pub use stellar_toml::handle_stellar_toml;
