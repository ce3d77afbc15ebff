//! Store state and per-family request tracking.

use crate::event::{Family, Ticket};
use crate::model::{CastMember, MovieDetail, MovieSummary};

/// Lifecycle status of one action family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// The latest request is in flight.
    Pending,
    /// The latest request resolved with data.
    Succeeded,
    /// The latest request failed with this message.
    Failed(String),
}

/// Status plus the generation of the latest issued request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Tracker {
    pub(crate) status: Status,
    pub(crate) generation: u64,
}

/// Data for one family, kept beside its request status.
///
/// A failure leaves `data` untouched so the previous result stays available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slice<T> {
    pub(crate) data: T,
    pub(crate) tracker: Tracker,
}

impl<T> Slice<T> {
    /// Returns the stored data.
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Returns the current status.
    pub const fn status(&self) -> &Status {
        &self.tracker.status
    }

    /// Whether the latest request is still in flight.
    pub const fn is_loading(&self) -> bool {
        matches!(self.tracker.status, Status::Pending)
    }

    /// Error message of the latest request, if it failed.
    pub fn error(&self) -> Option<&str> {
        match &self.tracker.status {
            Status::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

/// Everything the views read.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    /// Popular listing.
    pub popular: Slice<Vec<MovieSummary>>,
    /// Top-rated listing.
    pub top_rated: Slice<Vec<MovieSummary>>,
    /// Upcoming listing.
    pub upcoming: Slice<Vec<MovieSummary>>,
    /// Search results.
    pub search_results: Slice<Vec<MovieSummary>>,
    /// Currently selected movie.
    pub selected: Slice<Option<MovieDetail>>,
    /// Cast of the selected movie.
    pub cast: Slice<Vec<CastMember>>,
    /// Page number from the last popular response.
    pub page: u32,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            popular: Slice::default(),
            top_rated: Slice::default(),
            upcoming: Slice::default(),
            search_results: Slice::default(),
            selected: Slice::default(),
            cast: Slice::default(),
            page: 1,
        }
    }
}

impl StoreState {
    /// Returns the status of `family`.
    #[must_use]
    pub const fn status(&self, family: Family) -> &Status {
        &self.tracker(family).status
    }

    /// Whether `family` has a request in flight.
    #[must_use]
    pub const fn is_loading(&self, family: Family) -> bool {
        matches!(self.tracker(family).status, Status::Pending)
    }

    /// Error message for `family`, if its latest request failed.
    #[must_use]
    pub fn error(&self, family: Family) -> Option<&str> {
        match &self.tracker(family).status {
            Status::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Whether any family has a request in flight.
    #[must_use]
    pub fn any_loading(&self) -> bool {
        Family::ALL.iter().any(|f| self.is_loading(*f))
    }

    /// Builds the ticket for the next request of `family`.
    #[must_use]
    pub const fn next_ticket(&self, family: Family) -> Ticket {
        Ticket {
            family,
            generation: self.tracker(family).generation.saturating_add(1),
        }
    }

    /// Whether `ticket` is the latest issued request and still pending.
    #[must_use]
    pub const fn is_current(&self, ticket: Ticket) -> bool {
        let tracker = self.tracker(ticket.family);
        tracker.generation == ticket.generation && matches!(tracker.status, Status::Pending)
    }

    pub(crate) const fn tracker(&self, family: Family) -> &Tracker {
        match family {
            Family::Popular => &self.popular.tracker,
            Family::TopRated => &self.top_rated.tracker,
            Family::Upcoming => &self.upcoming.tracker,
            Family::Search => &self.search_results.tracker,
            Family::Detail => &self.selected.tracker,
            Family::Cast => &self.cast.tracker,
        }
    }

    pub(crate) const fn tracker_mut(&mut self, family: Family) -> &mut Tracker {
        match family {
            Family::Popular => &mut self.popular.tracker,
            Family::TopRated => &mut self.top_rated.tracker,
            Family::Upcoming => &mut self.upcoming.tracker,
            Family::Search => &mut self.search_results.tracker,
            Family::Detail => &mut self.selected.tracker,
            Family::Cast => &mut self.cast.tracker,
        }
    }
}
