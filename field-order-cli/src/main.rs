//! field-order CLI - edit field visibility and order.
//!
//! Commands:
//! - `field-order list [--projection P] [--json]`: List fields
//! - `field-order show <id> [--json]`: Show one field
//! - `field-order visible <id> <projection> <on|off>`: Show or hide a field
//! - `field-order order <id> <projection> <n|none>`: Move or hide a field
//! - `field-order orders <projection>`: Assignable orders and visible count
//! - `field-order apply <file>`: Apply a YAML action list atomically
//! - `field-order reset`: Hide every field
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use tracing_subscriber::EnvFilter;

use field_order_cli::{run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("field_order=debug,field_order_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run(cli).await {
        Ok(output) => {
            println!("{output}");
            0
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    };

    std::process::exit(exit_code);
}
