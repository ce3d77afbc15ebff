//! Movie store for cinehaven.
//!
//! State lives in an explicit [`Store`] context object. Every transition is
//! an [`Event`] applied by the pure [`reduce`] function, and each action
//! family tracks its own status and request generation.

/// Requests, tickets, and events.
pub mod event;
/// Domain model mirrored from the API.
pub mod model;
/// Pure state transitions.
pub mod reducer;
/// Store state and per-family slices.
pub mod state;
/// Async dispatcher.
pub mod store;

pub use event::{Event, Family, Payload, Request, Ticket};
pub use model::{CastMember, Genre, MovieDetail, MoviePage, MovieSummary};
pub use reducer::reduce;
pub use state::{Slice, Status, StoreState};
pub use store::Store;
