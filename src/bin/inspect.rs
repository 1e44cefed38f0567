//! vtproto Inspect Binary
//!
//! Introspects the built-in schemas and checks hex-encoded payloads.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use vtproto::{Cardinality, Codec, Config, Registry};

/// vtproto schema inspector
#[derive(Parser, Debug)]
#[command(name = "vtproto-inspect")]
#[command(about = "Inspect message schemas and check encoded payloads")]
#[command(version)]
struct Args {
    /// Maximum payload size in bytes
    #[arg(long, default_value = "67108864")]
    max_message_size: usize,

    /// Maximum embedded message depth
    #[arg(long, default_value = "100")]
    max_depth: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered message types
    Types,

    /// Print the field table of a message type
    Describe {
        /// Fully qualified type name, e.g. replicationdata.Status
        type_name: String,
    },

    /// Decode a hex payload and report which fields are set
    Check {
        /// Fully qualified type name
        type_name: String,

        /// Payload as hex
        payload: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vtproto=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let registry = match Registry::with_builtin_schemas() {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to register schemas: {}", e);
            std::process::exit(1);
        }
    };

    let config = Config::builder()
        .max_message_size(args.max_message_size)
        .max_depth(args.max_depth)
        .build();

    if let Err(e) = run(&registry, config, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(registry: &Registry, config: Config, command: Commands) -> vtproto::Result<()> {
    match command {
        Commands::Types => {
            for name in registry.type_names() {
                println!("{}", name);
            }
        }
        Commands::Describe { type_name } => {
            let descriptor = registry.resolve(&type_name)?;
            println!("message {}", descriptor.full_name());
            for field in descriptor.fields_by_number() {
                let label = match field.cardinality() {
                    Cardinality::Repeated => "repeated ",
                    Cardinality::Singular => "",
                };
                println!("  {}{} {} = {};", label, field.kind(), field.name(), field.number());
            }
        }
        Commands::Check { type_name, payload } => {
            let bytes = hex::decode(payload.trim()).map_err(|e| {
                vtproto::ProtoError::MalformedWireData(format!("invalid hex: {}", e))
            })?;

            let codec = Codec::with_config(registry, config);
            let value = codec.decode_type(&type_name, &bytes)?;
            let canonical = codec.encode_value(&value)?;

            println!("type:      {}", value.type_name());
            println!("input:     {} bytes", bytes.len());
            println!("canonical: {} bytes", canonical.len());
            println!("set:       {}", value.set_fields().join(", "));
        }
    }
    Ok(())
}
