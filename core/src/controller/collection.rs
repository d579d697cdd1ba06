//! List view: full collection, filtered view, search and delete.

use crate::client::RestaurantClient;
use crate::error::ApiError;
use crate::http::Outcome;
use crate::interpret::{ErrorCategory, ErrorInterpreter, ErrorReport, Operation};
use crate::routes::is_missing_id;
use crate::types::Restaurant;

use super::{Pending, Sequencer, TicketKind, Ticket};

pub const DELETE_PROMPT: &str = "¿Estás seguro de que deseas eliminar este restaurante?\n\n\
    ADVERTENCIA: Esta acción eliminará también:\n\
    - Todos los menús asociados\n\
    - Todas las mesas del restaurante\n\
    - Todas las reservas realizadas\n\n\
    Esta acción NO se puede deshacer.";

const MISSING_ID_MESSAGE: &str = "Error: No se pudo obtener el ID del restaurante para eliminar.";

/// Proof that the user was asked before a delete. Only
/// `CollectionController::request_delete` creates one.
#[derive(Debug)]
pub struct DeleteConfirmation {
    id: String,
}

impl DeleteConfirmation {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn prompt(&self) -> &'static str {
        DELETE_PROMPT
    }
}

/// Who currently owns the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    /// Mirrors the full collection.
    All,
    /// Shows the results of the search issued with this sequence number.
    Search { seq: u64 },
}

#[derive(Debug)]
pub struct CollectionController {
    client: RestaurantClient,
    interpreter: ErrorInterpreter,
    sequencer: Sequencer,
    restaurants: Vec<Restaurant>,
    filtered: Vec<Restaurant>,
    search_term: String,
    view: View,
    latest_load: Option<u64>,
    loading_for: Option<u64>,
    error: Option<ErrorReport>,
}

impl CollectionController {
    pub fn new(client: RestaurantClient) -> Self {
        let interpreter = ErrorInterpreter::new(client.base_url());
        Self {
            client,
            interpreter,
            sequencer: Sequencer::default(),
            restaurants: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            view: View::All,
            latest_load: None,
            loading_for: None,
            error: None,
        }
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// What the list view displays.
    pub fn filtered(&self) -> &[Restaurant] {
        &self.filtered
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_loading(&self) -> bool {
        self.loading_for.is_some()
    }

    pub fn error(&self) -> Option<&ErrorReport> {
        self.error.as_ref()
    }

    fn issue(&mut self, kind: TicketKind) -> Ticket {
        let ticket = self.sequencer.issue(kind);
        self.loading_for = Some(ticket.seq());
        self.error = None;
        ticket
    }

    fn show_all(&mut self) {
        self.view = View::All;
        self.filtered = self.restaurants.clone();
    }

    fn fail(&mut self, error: &ApiError, operation: Operation) {
        self.error = Some(self.interpreter.report(error, operation));
    }

    /// Fetches the full collection. Clears any active search.
    pub fn load(&mut self) -> Pending {
        let ticket = self.issue(TicketKind::Load);
        self.latest_load = Some(ticket.seq());
        self.search_term.clear();
        self.view = View::All;
        Pending {
            ticket,
            request: self.client.build_list(),
        }
    }

    /// A blank term shows the full collection without a request; anything
    /// else asks the backend.
    pub fn search(&mut self, term: &str) -> Option<Pending> {
        self.search_term = term.to_string();
        let term = term.trim();
        if term.is_empty() {
            self.show_all();
            return None;
        }
        let ticket = self.issue(TicketKind::Search);
        self.view = View::Search { seq: ticket.seq() };
        tracing::debug!(term, seq = ticket.seq(), "searching restaurants");
        Some(Pending {
            ticket,
            request: self.client.build_search(term),
        })
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.show_all();
    }

    /// First half of a delete. Rejects a missing id locally; otherwise the
    /// caller must show `DELETE_PROMPT` and pass the confirmation on.
    pub fn request_delete(&mut self, id: Option<&str>) -> Option<DeleteConfirmation> {
        match id.map(str::trim) {
            Some(id) if !is_missing_id(id) => Some(DeleteConfirmation { id: id.to_string() }),
            _ => {
                tracing::warn!(?id, "refusing to delete without a restaurant id");
                self.error = Some(ErrorReport {
                    message: MISSING_ID_MESSAGE.to_string(),
                    category: ErrorCategory::Validation,
                });
                None
            }
        }
    }

    pub fn confirm_delete(&mut self, confirmation: DeleteConfirmation) -> Pending {
        let ticket = self.issue(TicketKind::Delete);
        tracing::info!(id = confirmation.id(), "deleting restaurant");
        Pending {
            ticket,
            request: self.client.build_delete(&confirmation.id),
        }
    }

    /// Applies a finished request. Returns the follow-up request, if any: a
    /// successful delete refetches the whole collection rather than removing
    /// the row locally.
    pub fn complete(&mut self, ticket: Ticket, outcome: Outcome) -> Option<Pending> {
        if self.loading_for == Some(ticket.seq()) {
            self.loading_for = None;
        }

        match ticket.kind() {
            TicketKind::Load => {
                if self.latest_load != Some(ticket.seq()) {
                    tracing::debug!(seq = ticket.seq(), "dropping stale load response");
                    return None;
                }
                let result = outcome
                    .map_err(ApiError::from)
                    .and_then(|response| self.client.parse_list(response));
                match result {
                    Ok(restaurants) => {
                        self.restaurants = restaurants;
                        if self.view == View::All {
                            self.filtered = self.restaurants.clone();
                        }
                    }
                    Err(err) => self.fail(&err, Operation::Load),
                }
                None
            }
            TicketKind::Search => {
                if self.view != (View::Search { seq: ticket.seq() }) {
                    tracing::debug!(seq = ticket.seq(), "dropping stale search response");
                    return None;
                }
                let result = outcome
                    .map_err(ApiError::from)
                    .and_then(|response| self.client.parse_list(response));
                match result {
                    Ok(found) => self.filtered = found,
                    Err(err) => {
                        self.fail(&err, Operation::Search);
                        self.show_all();
                    }
                }
                None
            }
            TicketKind::Delete => {
                let result = outcome
                    .map_err(ApiError::from)
                    .and_then(|response| self.client.parse_delete(response));
                match result {
                    Ok(()) => {
                        tracing::info!("restaurant deleted, reloading collection");
                        Some(self.load())
                    }
                    Err(err) => {
                        self.fail(&err, Operation::Delete);
                        None
                    }
                }
            }
            TicketKind::Fetch | TicketKind::Save => {
                tracing::warn!(kind = ?ticket.kind(), "ticket was not issued by the list view");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpFailure, HttpMethod, HttpResponse};

    fn controller() -> CollectionController {
        CollectionController::new(RestaurantClient::new("http://localhost:8000"))
    }

    fn ok(body: &str) -> Outcome {
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    const TWO: &str =
        r#"[{"id_restaurante":"a","nombre":"Uno"},{"id_restaurante":"b","nombre":"Dos"}]"#;

    #[test]
    fn load_fills_both_views() {
        let mut c = controller();
        let pending = c.load();
        assert!(c.is_loading());
        assert_eq!(pending.request.method, HttpMethod::Get);
        assert!(c.complete(pending.ticket, ok(TWO)).is_none());
        assert!(!c.is_loading());
        assert_eq!(c.restaurants().len(), 2);
        assert_eq!(c.filtered().len(), 2);
    }

    #[test]
    fn blank_search_needs_no_request() {
        let mut c = controller();
        let pending = c.load();
        c.complete(pending.ticket, ok(TWO));
        let pending = c.search("Uno").unwrap();
        c.complete(pending.ticket, ok(r#"[{"id":"a","nombre":"Uno"}]"#));
        assert_eq!(c.filtered().len(), 1);

        assert!(c.search("   ").is_none());
        assert_eq!(c.filtered().len(), 2);
        assert!(!c.is_loading());
    }

    #[test]
    fn missing_id_is_rejected_locally() {
        let mut c = controller();
        for id in [None, Some(""), Some("undefined"), Some("null")] {
            assert!(c.request_delete(id).is_none());
            assert_eq!(c.error().unwrap().message, MISSING_ID_MESSAGE);
        }
        assert!(!c.is_loading());
    }

    #[test]
    fn create_markers_can_be_deleted() {
        let mut c = controller();
        for id in ["new", "nuevo"] {
            let confirmation = c.request_delete(Some(id)).unwrap();
            assert_eq!(confirmation.id(), id);
            let pending = c.confirm_delete(confirmation);
            assert_eq!(
                pending.request.path,
                format!("http://localhost:8000/restaurantes/{id}/")
            );
        }
        assert!(c.error().is_none());
    }

    #[test]
    fn confirmation_carries_the_prompt() {
        let mut c = controller();
        let confirmation = c.request_delete(Some("a")).unwrap();
        assert_eq!(confirmation.id(), "a");
        assert!(confirmation.prompt().contains("NO se puede deshacer"));
    }

    #[test]
    fn unreachable_load_reports_backend_address() {
        let mut c = controller();
        let pending = c.load();
        c.complete(pending.ticket, Err(HttpFailure::Unreachable));
        let error = c.error().unwrap();
        assert_eq!(error.category, ErrorCategory::Network);
        assert!(error.message.contains("http://localhost:8000"));
    }
}
