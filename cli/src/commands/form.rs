//! Create and edit handlers.
//!
//! Both go through the record controller: edit fetches the record first,
//! then the given fields replace the loaded ones before saving. A successful
//! save navigates back to the list, which is printed.

use restaurantes_core::{
    CollectionController, FormMode, FormStatus, Pending, RecordController, RestaurantForm, Route,
};

use super::list::print_restaurants;
use super::{drive, Context};
use crate::cli::FormArgs;
use crate::error::CliError;

const SAVE_FAILED: &str = "No se pudo guardar el restaurante.";

pub fn create(fields: FormArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let (form, _) = RecordController::init(ctx.client.clone(), None);
    submit(form, fields, ctx)
}

/// `target` is either a bare id or a front-end route such as
/// `/restaurantes/editar/42`.
pub fn edit(target: &str, fields: FormArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let route = if target.starts_with('/') {
        Route::parse(target)
    } else {
        Route::Edit {
            id: target.to_string(),
        }
    };
    tracing::debug!(%route, "opening form");

    let (mut form, fetch) = RecordController::init(ctx.client.clone(), route.id_param());
    if form.mode() == &FormMode::Create {
        tracing::warn!(input = target, "no restaurant id given, creating a new one instead");
    }
    if let Some(Pending { ticket, request }) = fetch {
        form.complete_load(ticket, ctx.transport.execute(request));
    }
    if form.status() == FormStatus::LoadFailed {
        if let Some(report) = form.error() {
            return Err(report.into());
        }
    }
    submit(form, fields, ctx)
}

fn submit(mut form: RecordController, fields: FormArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    if let Some(draft) = form.form_mut() {
        apply(draft, fields);
    }

    let Some(Pending { ticket, request }) = form.save() else {
        return Err(CliError::reported(form.error(), SAVE_FAILED));
    };

    let Some(navigation) = form.complete_save(ticket, ctx.transport.execute(request)) else {
        return Err(CliError::reported(form.error(), SAVE_FAILED));
    };

    match form.mode() {
        FormMode::Create => eprintln!("Restaurante creado."),
        FormMode::Edit { .. } => eprintln!("Restaurante actualizado."),
    }

    match navigation.route() {
        Route::List => {
            let mut list = CollectionController::new(ctx.client.clone());
            let pending = list.load();
            drive(&mut list, pending, &ctx.transport);
            if let Some(report) = list.error() {
                return Err(report.into());
            }
            print_restaurants(&list, ctx.global.output)
        }
        other => {
            tracing::debug!(%other, "nothing to show for route");
            Ok(())
        }
    }
}

fn apply(draft: &mut RestaurantForm, fields: FormArgs) {
    let FormArgs {
        nombre,
        direccion,
        telefono,
        email,
        capacidad,
        tipo_cocina,
    } = fields;
    let slots = [
        (&mut draft.nombre, nombre),
        (&mut draft.direccion, direccion),
        (&mut draft.telefono, telefono),
        (&mut draft.email, email),
        (&mut draft.capacidad, capacidad),
        (&mut draft.tipo_cocina, tipo_cocina),
    ];
    for (slot, value) in slots {
        if let Some(value) = value {
            *slot = value;
        }
    }
}
