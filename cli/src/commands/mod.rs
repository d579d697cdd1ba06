//! Command handlers. Each one owns a controller and drives its pending
//! requests through the `Transport` until nothing is left to send.

mod delete;
mod form;
mod list;

use restaurantes_core::{CollectionController, Pending, RestaurantClient};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::transport::Transport;

/// Everything a handler needs to reach the backend.
pub struct Context<'a> {
    pub client: RestaurantClient,
    pub transport: Transport,
    pub global: &'a GlobalOpts,
}

pub fn dispatch(cmd: Command, ctx: &Context<'_>) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => list::handle(args, ctx),
        Command::New(fields) => form::create(fields, ctx),
        Command::Edit { target, fields } => form::edit(&target, fields, ctx),
        Command::Delete { id, yes } => delete::handle(&id, yes, ctx),
    }
}

/// Runs a list-view request and any follow-up it triggers.
fn drive(list: &mut CollectionController, pending: Pending, transport: &Transport) {
    let mut next = Some(pending);
    while let Some(Pending { ticket, request }) = next {
        next = list.complete(ticket, transport.execute(request));
    }
}
