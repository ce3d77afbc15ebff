//! Requests, tickets, and events.

use std::fmt;

use crate::model::{CastMember, MovieDetail, MoviePage};

/// An action family: one category of fetch with its own lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Popular movie listing.
    Popular,
    /// Top-rated movie listing.
    TopRated,
    /// Upcoming movie listing.
    Upcoming,
    /// Title search.
    Search,
    /// Single movie detail.
    Detail,
    /// Cast of a single movie.
    Cast,
}

impl Family {
    /// All families, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Popular,
        Self::TopRated,
        Self::Upcoming,
        Self::Search,
        Self::Detail,
        Self::Cast,
    ];

    /// Human-readable label used in fallback error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popular => "popular movies",
            Self::TopRated => "top-rated movies",
            Self::Upcoming => "upcoming movies",
            Self::Search => "search results",
            Self::Detail => "movie details",
            Self::Cast => "cast details",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fetch to perform against the catalog service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Popular movies, by page.
    Popular {
        /// Page number (>= 1).
        page: u32,
    },
    /// Top-rated movies, by page.
    TopRated {
        /// Page number (>= 1).
        page: u32,
    },
    /// Upcoming movies, by page.
    Upcoming {
        /// Page number (>= 1).
        page: u32,
    },
    /// Title search (unpaged).
    Search {
        /// Raw query text.
        query: String,
    },
    /// Movie detail.
    Detail {
        /// TMDB movie ID.
        movie_id: u64,
    },
    /// Movie cast.
    Cast {
        /// TMDB movie ID.
        movie_id: u64,
    },
}

impl Request {
    /// Returns the family this request belongs to.
    #[must_use]
    pub const fn family(&self) -> Family {
        match self {
            Self::Popular { .. } => Family::Popular,
            Self::TopRated { .. } => Family::TopRated,
            Self::Upcoming { .. } => Family::Upcoming,
            Self::Search { .. } => Family::Search,
            Self::Detail { .. } => Family::Detail,
            Self::Cast { .. } => Family::Cast,
        }
    }
}

/// Identity of one issued request within its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    /// Family of the request.
    pub family: Family,
    /// Monotonic per-family sequence number, starting at 1.
    pub generation: u64,
}

/// Successful response data, one variant per family.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Popular listing page.
    Popular(MoviePage),
    /// Top-rated listing page.
    TopRated(MoviePage),
    /// Upcoming listing page.
    Upcoming(MoviePage),
    /// Search results.
    Search(MoviePage),
    /// Movie detail.
    Detail(MovieDetail),
    /// Cast list.
    Cast(Vec<CastMember>),
}

impl Payload {
    /// Returns the family this payload resolves.
    #[must_use]
    pub const fn family(&self) -> Family {
        match self {
            Self::Popular(_) => Family::Popular,
            Self::TopRated(_) => Family::TopRated,
            Self::Upcoming(_) => Family::Upcoming,
            Self::Search(_) => Family::Search,
            Self::Detail(_) => Family::Detail,
            Self::Cast(_) => Family::Cast,
        }
    }
}

/// A state transition input.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A request was issued.
    Pending(Ticket),
    /// A request resolved with data.
    Fulfilled(Ticket, Payload),
    /// A request failed with a human-readable message.
    Rejected(Ticket, String),
}

impl Event {
    /// Returns the ticket this event refers to.
    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        match self {
            Self::Pending(t) | Self::Fulfilled(t, _) | Self::Rejected(t, _) => *t,
        }
    }
}
