pub mod gmail_auth;
pub mod google_oauth;
pub mod token_store;
