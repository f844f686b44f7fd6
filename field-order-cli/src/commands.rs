//! Command implementations. Each returns the text to print on stdout.

use std::path::Path;

use anyhow::{bail, Context, Result};
use field_order::{
    parse_actions, FieldChange, FieldConfigService, FieldId, FieldOrderConfig, FieldOrderError,
    FieldRecord, Projection,
};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::table::records_table;

/// Open the service described by configuration and CLI overrides.
///
/// Read-only commands tolerate a missing state file and show the seed
/// catalog instead; mutating commands seed the file first.
async fn open_service(cli: &Cli, mutating: bool) -> Result<FieldConfigService> {
    let mut config = FieldOrderConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(file) = &cli.file {
        config.storage.path = file.clone();
    }
    debug!(path = %config.storage.path.display(), "using state file");

    let store = config.build_store()?;
    let storage = config.build_storage();
    let mut service = FieldConfigService::new(store, Box::new(storage));

    if mutating {
        service.load_or_seed().await?;
    } else {
        match service.load().await {
            Ok(()) | Err(FieldOrderError::StorageNotInitialized { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(service)
}

fn parse_order(raw: &str) -> Result<Option<u32>> {
    match raw.trim() {
        "none" | "null" | "-" => Ok(None),
        n => {
            let order: u32 = n
                .parse()
                .with_context(|| format!("invalid order '{n}' (expected a number or 'none')"))?;
            Ok(Some(order))
        }
    }
}

fn describe(change: Option<FieldChange>) -> String {
    match change {
        None => "No change".to_string(),
        Some(FieldChange::VisibilityChanged {
            id,
            projection,
            visible,
        }) => format!(
            "Field {id} {} in {projection}",
            if visible { "shown" } else { "hidden" }
        ),
        Some(FieldChange::OrdersSwapped {
            id,
            other,
            projection,
        }) => format!("Field {id} swapped with field {other} in {projection}"),
        Some(FieldChange::Reset) => "All fields hidden".to_string(),
        Some(FieldChange::Replaced) => "Fields replaced".to_string(),
        Some(FieldChange::BatchApplied { actions }) => format!("Applied {actions} actions"),
    }
}

fn render_records(records: Vec<&FieldRecord>, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(&records)?)
    } else {
        Ok(records_table(records).to_string())
    }
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<String> {
    let mutating = matches!(
        cli.command,
        Commands::Visible { .. } | Commands::Order { .. } | Commands::Apply { .. } | Commands::Reset
    );
    let mut service = open_service(&cli, mutating).await?;

    let output = match &cli.command {
        Commands::List { projection, json } => {
            let records = match projection {
                Some(p) => {
                    let projection: Projection = p.parse()?;
                    service.store().visible_in(projection)
                }
                None => service.get_all().iter().collect(),
            };
            render_records(records, *json)?
        }

        Commands::Show { id, json } => {
            let Some(record) = service.store().get(FieldId(*id)) else {
                return Err(FieldOrderError::NotFound { id: FieldId(*id) }.into());
            };
            render_records(vec![record], *json)?
        }

        Commands::Visible {
            id,
            projection,
            state,
        } => {
            let projection: Projection = projection.parse()?;
            let change = service.set_visibility(FieldId(*id), projection, state.is_on())?;
            describe(change)
        }

        Commands::Order {
            id,
            projection,
            order,
        } => {
            let projection: Projection = projection.parse()?;
            let order = parse_order(order)?;
            let change = service.set_order(FieldId(*id), projection, order)?;
            describe(change)
        }

        Commands::Orders { projection, json } => {
            let projection: Projection = projection.parse()?;
            let orders = service.available_orders(projection);
            let checked = service.checked_count(projection);
            if *json {
                serde_json::to_string_pretty(&serde_json::json!({
                    "projection": projection,
                    "checkedCount": checked,
                    "availableOrders": orders,
                }))?
            } else {
                let list: Vec<String> = orders.iter().map(u32::to_string).collect();
                format!(
                    "{projection}: {checked} visible, orders [{}]",
                    list.join(", ")
                )
            }
        }

        Commands::Apply { actions } => {
            let actions = read_actions(actions)?;
            let change = service.apply_batch(&actions)?;
            describe(change)
        }

        Commands::Reset => describe(service.reset()),
    };

    if mutating && service.status().dirty {
        service.save().await?;
    }
    Ok(output)
}

fn read_actions(path: &Path) -> Result<Vec<field_order::FieldAction>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read actions file {}", path.display()))?;
    let actions = parse_actions(&content)?;
    if actions.is_empty() {
        bail!("actions file {} contains no actions", path.display());
    }
    Ok(actions)
}
