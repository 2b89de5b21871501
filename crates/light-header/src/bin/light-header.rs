use clap::{Parser, Subcommand};
use eddsa_bn254::{PrivateKey, PublicKey, TypeRegistry};
use eyre::{Result, WrapErr};
use light_header::{Block, HeaderReport, LightHeaderBuilder, ValidatorSet};
use serde_json::{json, Value};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt::Subscriber};

/// EdDSA-BN254 keys and light client headers
#[derive(Debug, Parser)]
#[command(name = "light-header", version)]
struct Options {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generates a key pair and prints both keys as tagged envelopes
    Keygen {
        /// Derive the key deterministically from this secret instead of the OS randomness
        #[arg(long)]
        secret: Option<String>,
    },
    /// Signs a hex encoded message
    Sign {
        /// File holding the private key envelope
        #[arg(long)]
        key: PathBuf,
        #[arg(long)]
        message: String,
    },
    /// Verifies a hex encoded signature over a hex encoded message
    Verify {
        /// File holding the public key envelope
        #[arg(long)]
        key: PathBuf,
        #[arg(long)]
        message: String,
        #[arg(long)]
        signature: String,
    },
    /// Builds the light header of a block from JSON files
    Build {
        /// `{"app_hash": hex, "time": unix seconds, "height": number}`
        #[arg(long)]
        block: PathBuf,
        /// `[{"pub_key": hex, "voting_power": number}, ...]`
        #[arg(long)]
        validators: PathBuf,
    },
}

fn main() -> Result<()> {
    Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = Options::parse();
    let registry = TypeRegistry::with_eddsa_bn254()?;

    let output = match options.command {
        Command::Keygen { secret } => {
            let private_key = match secret {
                Some(secret) => PrivateKey::from_secret(secret.as_bytes()),
                None => PrivateKey::generate_key()?,
            };
            let public_key = private_key.public_key()?;
            info!(address = %hex::encode(public_key.address()), "generated key");
            json!({
                "priv_key": serde_json::from_str::<Value>(&registry.encode(&private_key)?)?,
                "pub_key": serde_json::from_str::<Value>(&registry.encode(&public_key)?)?,
                "address": hex::encode(public_key.address()),
            })
        }
        Command::Sign { key, message } => {
            let private_key: PrivateKey = registry.decode_as(&read_to_string(&key)?)?;
            let signature = private_key.sign(&decode_hex(&message)?)?;
            json!({ "signature": hex::encode(signature.to_bytes()) })
        }
        Command::Verify {
            key,
            message,
            signature,
        } => {
            let public_key: PublicKey = registry.decode_as(&read_to_string(&key)?)?;
            let valid = public_key.verify(&decode_hex(&message)?, &decode_hex(&signature)?);
            json!({ "valid": valid })
        }
        Command::Build { block, validators } => {
            let block: Block = read_json(&block)?;
            let validators: ValidatorSet = read_json(&validators)?;
            let header = LightHeaderBuilder::new()
                .build(&block, &validators)
                .wrap_err_with(|| {
                    format!("cannot build the light header at height {}", block.height)
                })?;
            serde_json::to_value(HeaderReport::from(&header))?
        }
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn decode_hex(value: &str) -> Result<Vec<u8>> {
    hex::decode(value.trim_start_matches("0x"))
        .wrap_err_with(|| format!("invalid hex {:?}", value))
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).wrap_err_with(|| format!("cannot read {}", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).wrap_err_with(|| format!("cannot open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("cannot parse {}", path.display()))
}
