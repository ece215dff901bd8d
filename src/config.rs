use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::keys::DEFAULT_KEY_BITS;

#[derive(Debug, Parser)]
#[command(name = "beaconr")]
#[command(about = "Beacon variant lookup client with signed requests", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a public/private key pair
    GenKey(GenKeyArgs),
    /// Run a signed query against a beacon endpoint
    Query(QueryArgs),
}

#[derive(Debug, Args)]
pub struct GenKeyArgs {
    /// RSA key length in bits
    #[arg(long, default_value_t = DEFAULT_KEY_BITS)]
    pub key_length: usize,

    /// Path to the private key output file; the public key is written to <path>.pub
    #[arg(long, default_value = "key_rsa")]
    pub key_file: PathBuf,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Path to the private key file
    #[arg(long, env = "BEACON_KEY_FILE", default_value = "key_rsa")]
    pub key_file: PathBuf,

    /// Key identifier the remote site verifies the signature against (keyId)
    #[arg(long, env = "BEACON_KEY_ID")]
    pub key_id: String,

    /// Value for the X-Beacon-User header
    #[arg(long, env = "BEACON_USER")]
    pub beacon_user: String,

    /// Remote endpoint URL
    #[arg(long, env = "BEACON_ENDPOINT")]
    pub endpoint: String,

    /// Variant as CHROM-POS-REF-ALT; if omitted, the beacon info is queried instead
    #[arg(long)]
    pub variant: Option<String>,
}
