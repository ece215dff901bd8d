pub mod client;
pub mod config;
pub mod error;
pub mod keys;
pub mod sign;
pub mod variant;

pub use client::{BeaconClient, Outcome};
pub use config::Cli;
pub use error::{Error, Result};
pub use sign::RequestSigner;
pub use variant::Variant;
