//! Create/edit form.
//!
//! The mode is fixed once, from the route parameter. In edit mode the record
//! is fetched right away; if that fetch fails the form stays blocked.

use crate::client::RestaurantClient;
use crate::error::ApiError;
use crate::http::Outcome;
use crate::interpret::{ErrorCategory, ErrorInterpreter, ErrorReport, Operation};
use crate::payload;
use crate::routes::{FormMode, Route};
use crate::types::{Restaurant, RestaurantForm, SaveMode};

use super::{Pending, Sequencer, Ticket, TicketKind};

const NOT_LOADED_MESSAGE: &str = "No se puede guardar: el restaurante no se pudo cargar.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    /// Waiting for the record to edit.
    Loading,
    Editing,
    Saving,
    /// The record could not be fetched; nothing more can happen here.
    LoadFailed,
    Saved,
}

/// Where the host should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    ToList,
}

impl Navigation {
    pub fn route(&self) -> Route {
        match self {
            Navigation::ToList => Route::List,
        }
    }
}

#[derive(Debug)]
pub struct RecordController {
    client: RestaurantClient,
    interpreter: ErrorInterpreter,
    sequencer: Sequencer,
    mode: FormMode,
    form: RestaurantForm,
    loaded: Option<Restaurant>,
    saved: Option<Restaurant>,
    status: FormStatus,
    pending: Option<u64>,
    error: Option<ErrorReport>,
}

impl RecordController {
    /// Opens the form for `route_param`. In edit mode the returned request
    /// fetches the record.
    pub fn init(client: RestaurantClient, route_param: Option<&str>) -> (Self, Option<Pending>) {
        let interpreter = ErrorInterpreter::new(client.base_url());
        let mode = FormMode::from_route_param(route_param);
        tracing::debug!(?mode, "opening restaurant form");

        let mut controller = Self {
            client,
            interpreter,
            sequencer: Sequencer::default(),
            mode,
            form: RestaurantForm::default(),
            loaded: None,
            saved: None,
            status: FormStatus::Editing,
            pending: None,
            error: None,
        };

        let fetch = match &controller.mode {
            FormMode::Create => None,
            FormMode::Edit { id } => {
                let request = controller.client.build_get(id);
                let ticket = controller.sequencer.issue(TicketKind::Fetch);
                controller.pending = Some(ticket.seq());
                controller.status = FormStatus::Loading;
                Some(Pending { ticket, request })
            }
        };
        (controller, fetch)
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error(&self) -> Option<&ErrorReport> {
        self.error.as_ref()
    }

    pub fn form(&self) -> &RestaurantForm {
        &self.form
    }

    /// `None` once the edit fetch has failed.
    pub fn form_mut(&mut self) -> Option<&mut RestaurantForm> {
        match self.status {
            FormStatus::LoadFailed => None,
            _ => Some(&mut self.form),
        }
    }

    /// The record as fetched in edit mode.
    pub fn loaded(&self) -> Option<&Restaurant> {
        self.loaded.as_ref()
    }

    /// The record the backend returned from the last successful save.
    pub fn saved(&self) -> Option<&Restaurant> {
        self.saved.as_ref()
    }

    fn take_pending(&mut self, ticket: Ticket, kind: TicketKind) -> bool {
        if ticket.kind() != kind || self.pending != Some(ticket.seq()) {
            tracing::debug!(
                seq = ticket.seq(),
                kind = ?ticket.kind(),
                "dropping unexpected response"
            );
            return false;
        }
        self.pending = None;
        true
    }

    fn save_operation(&self) -> Operation {
        match self.mode {
            FormMode::Create => Operation::Create,
            FormMode::Edit { .. } => Operation::Update,
        }
    }

    pub fn complete_load(&mut self, ticket: Ticket, outcome: Outcome) {
        if !self.take_pending(ticket, TicketKind::Fetch) {
            return;
        }
        let result = outcome
            .map_err(ApiError::from)
            .and_then(|response| self.client.parse_get(response));
        match result {
            Ok(restaurant) => {
                self.form = RestaurantForm::from(&restaurant);
                self.loaded = Some(restaurant);
                self.status = FormStatus::Editing;
            }
            Err(err) => {
                self.error = Some(self.interpreter.report(&err, Operation::Fetch));
                self.status = FormStatus::LoadFailed;
            }
        }
    }

    /// Validates, builds the payload and issues the create or update.
    /// Returns `None` when nothing was sent; `error()` says why.
    pub fn save(&mut self) -> Option<Pending> {
        match self.status {
            FormStatus::LoadFailed => {
                self.error = Some(ErrorReport {
                    message: NOT_LOADED_MESSAGE.to_string(),
                    category: ErrorCategory::Unknown,
                });
                return None;
            }
            FormStatus::Loading | FormStatus::Saving => return None,
            FormStatus::Saved if self.mode == FormMode::Create => {
                tracing::debug!("restaurant already created, ignoring save");
                return None;
            }
            FormStatus::Editing | FormStatus::Saved => {}
        }

        let operation = self.save_operation();
        let mode = match &self.mode {
            FormMode::Create => SaveMode::Create,
            FormMode::Edit { id } => SaveMode::Update { id: id.clone() },
        };

        let request = payload::validate(&self.form)
            .and_then(|()| payload::to_backend_payload(&self.form, &mode))
            .map_err(ApiError::from)
            .and_then(|body| self.client.build_save(&mode, &body));
        let request = match request {
            Ok(request) => request,
            Err(err) => {
                self.error = Some(self.interpreter.report(&err, operation));
                return None;
            }
        };

        let ticket = self.sequencer.issue(TicketKind::Save);
        self.pending = Some(ticket.seq());
        self.status = FormStatus::Saving;
        self.error = None;
        Some(Pending { ticket, request })
    }

    /// Navigates back to the list only when the backend accepted the save.
    pub fn complete_save(&mut self, ticket: Ticket, outcome: Outcome) -> Option<Navigation> {
        if !self.take_pending(ticket, TicketKind::Save) {
            return None;
        }
        let operation = self.save_operation();
        let result = outcome
            .map_err(ApiError::from)
            .and_then(|response| self.client.parse_save(response));
        match result {
            Ok(restaurant) => {
                tracing::info!(id = %restaurant.id, ?operation, "restaurant saved");
                self.saved = Some(restaurant);
                self.status = FormStatus::Saved;
                Some(Navigation::ToList)
            }
            Err(err) => {
                self.error = Some(self.interpreter.report(&err, operation));
                self.status = FormStatus::Editing;
                None
            }
        }
    }

    pub fn cancel(&self) -> Navigation {
        Navigation::ToList
    }
}
