use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Voice gateway for text-to-speech providers
#[derive(Debug, Parser)]
#[command(name = "voxgate", about = "Text-to-speech dispatcher, voice cloning and web tools")]
pub struct Args {
    /// Path to configuration file; defaults apply when it does not exist
    #[arg(short, long, default_value = "voxgate.toml", env = "VOXGATE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "VOXGATE_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directives
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log: String,
}
