use std::fs::File;
use std::io::{Read, stdin};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use sanitize::{Options, Registry, Value};
use serde::Deserialize;
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "CODEC_SANITIZE_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "codec-sanitize",
    about = "Normalize JSON or codec values into canonical JSON with base-10 integers",
    version
)]
struct Args {
    /// Build a codec of this type from the input literal (e.g. `Compact<u128>`)
    #[arg(long = "type", value_name = "TYPE")]
    type_name: Option<String>,

    /// JSON file of named type definitions
    #[arg(long, value_name = "FILE", requires = "type_name")]
    types: Option<PathBuf>,

    /// Chain name for the registry
    #[arg(long, default_value = "development")]
    chain: String,

    /// Print the codec's native JSON instead of the sanitized form
    #[arg(long, default_value_t = false, requires = "type_name")]
    native: bool,

    /// Pretty-print JSON on output
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Nesting limit
    #[arg(long, default_value_t = sanitize::options::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

/// Either a bare `{name: definition}` object or one wrapped with a chain name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TypesFile {
    Bundle {
        chain: Option<String>,
        types: serde_json::Value,
    },
    Plain(serde_json::Value),
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut buf = String::new();
    match &args.input {
        Some(path) => {
            let mut f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            f.read_to_string(&mut buf)?;
        }
        None => {
            stdin().read_to_string(&mut buf)?;
        }
    }
    let literal: serde_json::Value = serde_json::from_str(&buf).context("input is not JSON")?;
    let options = Options::default().with_max_depth(args.max_depth);

    let value = match &args.type_name {
        Some(type_name) => {
            let registry = load_registry(&args.chain, args.types.as_deref())?;
            let codec = registry.create_type(type_name, &literal)?;
            tracing::info!(raw_type = %codec.to_raw_type(), chain = registry.chain(), "built codec");
            if args.native {
                codec.to_json()
            } else {
                sanitize::sanitize_codec(codec.as_ref(), &options)?
            }
        }
        None => sanitize::sanitize_with(&Value::from(literal), &options)?,
    };

    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", serde_json::to_string(&value)?);
    }

    Ok(())
}

fn load_registry(chain: &str, types: Option<&Path>) -> Result<std::sync::Arc<Registry>> {
    let mut registry = Registry::new(chain);
    if let Some(path) = types {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let defs = match serde_json::from_reader::<_, TypesFile>(file)? {
            TypesFile::Bundle { chain: Some(name), types } => {
                registry = Registry::new(name);
                types
            }
            TypesFile::Bundle { chain: None, types } => types,
            TypesFile::Plain(types) => types,
        };
        registry
            .register_all_json(&defs)
            .with_context(|| format!("loading types from {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded type definitions");
    }
    Ok(registry.into_shared())
}

fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_from_verbosity(verbosity).into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}
