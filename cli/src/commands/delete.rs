//! Delete handler: confirm, delete, then show the refetched collection.

use restaurantes_core::CollectionController;

use super::list::print_restaurants;
use super::{drive, Context};
use crate::error::CliError;

pub fn handle(id: &str, yes: bool, ctx: &Context<'_>) -> Result<(), CliError> {
    let mut list = CollectionController::new(ctx.client.clone());

    let Some(confirmation) = list.request_delete(Some(id)) else {
        return Err(CliError::reported(list.error(), "No se pudo eliminar el restaurante."));
    };

    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(confirmation.prompt())
            .default(false)
            .interact()?;
        if !confirmed {
            eprintln!("Eliminación cancelada.");
            return Ok(());
        }
    }

    let pending = list.confirm_delete(confirmation);
    drive(&mut list, pending, &ctx.transport);
    if let Some(report) = list.error() {
        return Err(report.into());
    }

    eprintln!("Restaurante eliminado.");
    print_restaurants(&list, ctx.global.output)
}
