//! CLI definition for the `field-order` command.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Inspect and edit which fields appear in the collapsed header and the
/// sample pane, and in which order.
///
/// State is kept in a YAML file (default `.field-order/fields.yaml`). The
/// first mutating command seeds it from the configured catalog.
#[derive(Parser, Debug)]
#[command(name = "field-order")]
#[command(version)]
#[command(about = "Edit field visibility and order for the collapsed header and sample pane")]
#[command(
    long_about = "Edit field visibility and order for the collapsed header and sample pane.\n\n\
    Visible fields in each projection always carry a gap-free order 1..k.\n\n\
    Configuration is read from field-order.{yaml,yml,toml,json} in the current \
    directory (or --config), then from FIELD_ORDER_* environment variables.\n\n\
    Environment variables:\n  \
    FIELD_ORDER_STORAGE__PATH  Override the state file location\n  \
    FIELD_ORDER_EVENT_CAPACITY Override the change event buffer size"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file to use instead of auto-discovery
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// State file to use instead of the configured storage path
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all fields with both projections
    List {
        /// Only fields visible in this projection, in order
        #[arg(long, value_name = "PROJECTION")]
        projection: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one field
    Show {
        /// Field id
        id: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or hide a field in a projection
    Visible {
        /// Field id
        id: u32,
        /// collapsedHeader (header) or samplePane (pane)
        projection: String,
        /// New visibility
        state: Toggle,
    },

    /// Move a visible field to a position, or `none` to hide it
    Order {
        /// Field id
        id: u32,
        /// collapsedHeader (header) or samplePane (pane)
        projection: String,
        /// Position (1..k) or `none`
        order: String,
    },

    /// Print assignable orders and the visible count of a projection
    Orders {
        /// collapsedHeader (header) or samplePane (pane)
        projection: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a YAML list of actions; all succeed or nothing changes
    Apply {
        /// Path to the actions file
        #[arg(value_name = "ACTIONS_FILE")]
        actions: PathBuf,
    },

    /// Hide every field in both projections
    Reset,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        matches!(self, Toggle::On)
    }
}
