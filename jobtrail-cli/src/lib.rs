pub mod config;
pub mod helpers;
pub mod integrations;
pub mod pipeline;

pub use config::TrackerConfig;
pub use integrations::gmail_client::GmailClient;
