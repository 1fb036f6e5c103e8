//! Bitcoin wallet CLI Application
//!
//! A command-line interface for keys, addresses and P2P message frames.

use btc_wallet::cli::{self, FrameKind};
use btc_wallet::config::Config;
use btc_wallet::core::NetworkType;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "btcwallet")]
#[command(author = "Darshan")]
#[command(version)]
#[command(about = "Bitcoin keys, addresses and wire messages", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Network to use (main or test), overrides the configuration file
    #[arg(short, long)]
    network: Option<NetworkType>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new private key
    Keygen,

    /// Derive the address of a key
    Address {
        /// Private key (hex)
        #[arg(short, long)]
        key: Option<String>,

        /// Public key, compressed or uncompressed (hex)
        #[arg(short, long)]
        pubkey: Option<String>,
    },

    /// Export a private key as WIF
    Wif {
        /// Private key (hex)
        #[arg(short, long)]
        key: String,
    },

    /// Import a WIF private key
    ImportWif {
        /// WIF string
        wif: String,
    },

    /// Base58 / Base58Check conversions
    Base58 {
        #[command(subcommand)]
        action: Base58Commands,
    },

    /// Build a P2P message frame
    Frame {
        /// Message to build
        #[arg(value_enum)]
        message: FrameArg,

        /// Receiving peer address (host:port) for version messages
        #[arg(short, long)]
        peer: Option<String>,
    },

    /// Decode a P2P message frame given as hex
    DecodeFrame {
        /// Frame bytes (hex)
        frame: String,
    },

    /// Connect to a node and perform the version handshake
    Handshake {
        /// Peer address (host:port)
        #[arg(short, long)]
        peer: String,
    },
}

#[derive(Subcommand)]
enum Base58Commands {
    /// Encode hex data
    Encode {
        /// Data to encode (hex)
        data: String,

        /// Version byte
        #[arg(long, default_value = "0")]
        version: u8,

        /// Plain Base58 without version and checksum
        #[arg(long)]
        raw: bool,
    },

    /// Decode text to hex
    Decode {
        /// Base58 text
        text: String,

        /// Plain Base58 without version and checksum
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FrameArg {
    Version,
    Verack,
}

impl From<FrameArg> for FrameKind {
    fn from(arg: FrameArg) -> Self {
        match arg {
            FrameArg::Version => FrameKind::Version,
            FrameArg::Verack => FrameKind::Verack,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(network) = cli.network {
        config.network = network;
    }

    match cli.command {
        Commands::Keygen => cli::cmd_keygen(&config)?,

        Commands::Address { key, pubkey } => {
            cli::cmd_address(&config, key.as_deref(), pubkey.as_deref())?;
        }

        Commands::Wif { key } => cli::cmd_wif(&key)?,

        Commands::ImportWif { wif } => cli::cmd_import_wif(&config, &wif)?,

        Commands::Base58 { action } => match action {
            Base58Commands::Encode { data, version, raw } => {
                cli::cmd_base58_encode(version, &data, raw)?;
            }
            Base58Commands::Decode { text, raw } => {
                cli::cmd_base58_decode(&text, raw)?;
            }
        },

        Commands::Frame { message, peer } => {
            cli::cmd_frame(&config, message.into(), peer.as_deref())?;
        }

        Commands::DecodeFrame { frame } => cli::cmd_decode_frame(&config, &frame)?,

        Commands::Handshake { peer } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(cli::cmd_handshake(&config, &peer))?;
        }
    }

    Ok(())
}
