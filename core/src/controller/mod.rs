//! Interaction flow for the list view and the create/edit form.
//!
//! # Design
//! Controllers never perform I/O. When an action needs the backend they
//! return a `Pending`: the request to execute and a `Ticket` identifying it.
//! The host runs the request and hands the `Outcome` back with the same
//! ticket. Tickets carry a per-controller sequence number, so a response
//! that was overtaken by a newer request is recognised and dropped instead
//! of overwriting fresher state.

mod collection;
mod record;

pub use collection::{CollectionController, DeleteConfirmation, DELETE_PROMPT};
pub use record::{FormStatus, Navigation, RecordController};

use crate::http::HttpRequest;

/// What a pending request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketKind {
    Load,
    Search,
    Delete,
    Fetch,
    Save,
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    kind: TicketKind,
}

impl Ticket {
    pub fn kind(&self) -> TicketKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// A request the host should execute, tagged with its ticket.
#[derive(Debug, Clone)]
pub struct Pending {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

/// Monotonic ticket source owned by one controller.
#[derive(Debug, Default, Clone)]
pub(crate) struct Sequencer {
    last: u64,
}

impl Sequencer {
    pub(crate) fn issue(&mut self, kind: TicketKind) -> Ticket {
        self.last += 1;
        Ticket {
            seq: self.last,
            kind,
        }
    }
}
