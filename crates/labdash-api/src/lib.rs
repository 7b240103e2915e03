// labdash-api: Async Rust client for the IDS Lab Commander JSON endpoints

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{Client, STATUS_PATH};
pub use error::Error;
pub use models::{AlertFeed, StatusRecord};
pub use transport::TransportConfig;
