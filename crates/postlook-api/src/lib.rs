// postlook-api: Async Rust client for the address-lookup relay endpoint

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::LookupClient;
pub use error::Error;
pub use transport::TransportConfig;
pub use types::{AddressRow, AdministrativeArea, LookupEnvelope, LookupRequest, LookupStatus};
