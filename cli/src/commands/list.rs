//! List and search handlers.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use restaurantes_core::{CollectionController, Restaurant};

use super::{drive, Context};
use crate::cli::{ListArgs, OutputFormat};
use crate::error::CliError;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RestaurantRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Nombre")]
    nombre: String,
    #[tabled(rename = "Dirección")]
    direccion: String,
    #[tabled(rename = "Teléfono")]
    telefono: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Capacidad")]
    capacidad: String,
}

impl From<&Restaurant> for RestaurantRow {
    fn from(r: &Restaurant) -> Self {
        Self {
            id: r.id.clone(),
            nombre: r.nombre.clone(),
            direccion: r.direccion.clone(),
            telefono: r.telefono.clone(),
            email: r.email.clone().unwrap_or_default(),
            capacidad: r.capacidad().map(|c| c.to_string()).unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ListArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let mut list = CollectionController::new(ctx.client.clone());
    let pending = list.load();
    drive(&mut list, pending, &ctx.transport);
    if let Some(report) = list.error() {
        return Err(report.into());
    }

    if let Some(term) = args.search.as_deref() {
        if let Some(pending) = list.search(term) {
            drive(&mut list, pending, &ctx.transport);
        }
    }

    // A failed search still shows the full collection.
    print_restaurants(&list, ctx.global.output)?;
    match list.error() {
        Some(report) => Err(report.into()),
        None => Ok(()),
    }
}

/// Prints what the list view currently displays.
pub fn print_restaurants(
    list: &CollectionController,
    format: OutputFormat,
) -> Result<(), CliError> {
    let shown = list.filtered();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(shown)?),
        OutputFormat::Table if shown.is_empty() => {
            if list.search_term().trim().is_empty() {
                println!("No hay restaurantes registrados.");
            } else {
                println!("No se encontraron restaurantes para \"{}\".", list.search_term().trim());
            }
        }
        OutputFormat::Table => {
            let rows: Vec<RestaurantRow> = shown.iter().map(RestaurantRow::from).collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }
    Ok(())
}
