//! Read a config shape from the process environment and print it as JSON.
//!
//! ```text
//! print_effective_config \
//!     --field dbName=DATABASE_NAME:string \
//!     --field autoCommit=DATABASE_AUTO_COMMIT:boolean:false
//! ```
//!
//! Secret-looking fields are redacted. On failure every error is printed and
//! the process exits with status 1.

use clap::Parser;
use envsure_config::{
    FieldDeclaration, read_from_environment, shape_from_declarations, try_get_config,
};
use envsure_shared::ErrorEnvelope;
use std::collections::BTreeMap;
use std::io;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "print_effective_config",
    version,
    about = "Validate env-backed config fields and print the effective values"
)]
struct Args {
    /// Field declaration, `name=KEY:type[:default]` (type: string, boolean, number, list).
    #[arg(long = "field", value_name = "DECL", required = true)]
    fields: Vec<FieldDeclaration>,

    /// Delimiter for list fields.
    #[arg(long, default_value = ",")]
    list_delimiter: String,

    /// Name the config is printed under.
    #[arg(long, default_value = "config")]
    name: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(1)
        },
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let shape = shape_from_declarations(&args.fields, &args.list_delimiter)?;
    let validated = read_from_environment(&shape).await;

    let config = try_get_config([(args.name, validated)]).map_err(|error| {
        let envelope = ErrorEnvelope::from(error);
        for detail in &envelope.details {
            eprintln!("  - {detail}");
        }
        envelope
    })?;

    let printable: BTreeMap<_, _> = config
        .into_iter()
        .map(|(name, record)| (name, record.redacted(&shape)))
        .collect();

    let mut output = serde_json::to_string_pretty(&printable)?;
    output.push('\n');

    let mut stdout = io::stdout();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_repeated_field_declarations() -> Result<(), Box<dyn std::error::Error>> {
        let args = Args::try_parse_from([
            "print_effective_config",
            "--field",
            "dbName=DATABASE_NAME:string",
            "--field",
            "services=AWS_ENABLED_SERVICES:list",
            "--list-delimiter",
            ";",
        ])?;

        assert_eq!(args.fields.len(), 2);
        assert_eq!(args.list_delimiter, ";");
        assert_eq!(args.name, "config");
        Ok(())
    }

    #[test]
    fn rejects_unknown_field_types() {
        let result = Args::try_parse_from([
            "print_effective_config",
            "--field",
            "port=PORT:float",
        ]);
        assert!(result.is_err());
    }
}
