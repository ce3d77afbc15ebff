//! Page view models derived from store state.

/// Movie detail page.
pub mod detail;
/// Listing pages (popular, top rated, upcoming, search).
pub mod listing;

use cinehaven_store::Family;

pub use detail::{CastCard, DetailView, detail_view};
pub use listing::{ListingView, MovieCard, listing_view};

/// A grid page backed by one store family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// Popular movies.
    Popular,
    /// Top-rated movies.
    TopRated,
    /// Upcoming movies.
    Upcoming,
    /// Search results.
    Search,
}

impl Listing {
    /// Page heading.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Popular => "Popular Movies",
            Self::TopRated => "Top Rated Movies",
            Self::Upcoming => "Upcoming Movies",
            Self::Search => "Search Results",
        }
    }

    /// Store family holding this listing's data.
    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Self::Popular => Family::Popular,
            Self::TopRated => Family::TopRated,
            Self::Upcoming => Family::Upcoming,
            Self::Search => Family::Search,
        }
    }
}

/// Local page counter of a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pagination {
    /// Current page (>= 1).
    #[must_use]
    pub const fn current(self) -> u32 {
        self.page
    }

    /// Whether "Previous" is enabled.
    #[must_use]
    pub const fn previous_enabled(self) -> bool {
        self.page > 1
    }

    /// Advances one page. There is no upper bound.
    pub const fn next(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Goes back one page; no-op on page 1.
    pub const fn previous(&mut self) {
        if self.page > 1 {
            self.page = self.page.saturating_sub(1);
        }
    }

    /// Jumps to `page`, clamped to at least 1.
    pub fn go_to(&mut self, page: u32) {
        self.page = page.max(1);
    }
}

/// Rendering state of a page body.
#[derive(Debug, Clone, PartialEq)]
pub enum PageBody<T> {
    /// A request is in flight.
    Loading,
    /// The latest request failed.
    Failed(String),
    /// Nothing to show.
    NoData,
    /// Content is available.
    Ready(T),
}

impl<T> PageBody<T> {
    /// Returns the content when ready.
    #[must_use]
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(content) => Some(content),
            _ => None,
        }
    }
}

/// Grid column count for a terminal width.
#[must_use]
pub const fn grid_columns(width: u16) -> usize {
    match width {
        0..40 => 1,
        40..80 => 2,
        80..120 => 3,
        _ => 4,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Builds store states through the public reducer.

    use cinehaven_store::{Event, Family, MoviePage, MovieSummary, Payload, StoreState, reduce};

    pub fn pending(state: StoreState, family: Family) -> StoreState {
        let ticket = state.next_ticket(family);
        reduce(state, Event::Pending(ticket))
    }

    pub fn resolved(state: StoreState, payload: Payload) -> StoreState {
        let ticket = state.next_ticket(payload.family());
        let state = reduce(state, Event::Pending(ticket));
        reduce(state, Event::Fulfilled(ticket, payload))
    }

    pub fn failed(state: StoreState, family: Family, message: &str) -> StoreState {
        let ticket = state.next_ticket(family);
        let state = reduce(state, Event::Pending(ticket));
        reduce(state, Event::Rejected(ticket, String::from(message)))
    }

    pub fn page_of(movies: &[(u64, &str, Option<&str>)]) -> MoviePage {
        MoviePage {
            page: 1,
            total_pages: 1,
            results: movies
                .iter()
                .map(|(id, title, poster)| MovieSummary {
                    id: *id,
                    title: String::from(*title),
                    poster_path: poster.map(String::from),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_starts_at_one() {
        // Arrange & Act
        let pagination = Pagination::default();

        // Assert
        assert_eq!(pagination.current(), 1);
        assert!(!pagination.previous_enabled());
    }

    #[test]
    fn test_previous_disabled_only_on_first_page() {
        // Arrange
        let mut pagination = Pagination::default();

        // Act & Assert
        pagination.next();
        assert!(pagination.previous_enabled());
        pagination.previous();
        assert!(!pagination.previous_enabled());
        pagination.previous();
        assert_eq!(pagination.current(), 1);
    }

    #[test]
    fn test_go_to_clamps() {
        // Arrange
        let mut pagination = Pagination::default();

        // Act & Assert
        pagination.go_to(7);
        assert_eq!(pagination.current(), 7);
        pagination.go_to(0);
        assert_eq!(pagination.current(), 1);
    }

    #[test]
    fn test_grid_columns_breakpoints() {
        // Arrange & Act & Assert
        assert_eq!(grid_columns(20), 1);
        assert_eq!(grid_columns(39), 1);
        assert_eq!(grid_columns(40), 2);
        assert_eq!(grid_columns(80), 3);
        assert_eq!(grid_columns(119), 3);
        assert_eq!(grid_columns(200), 4);
    }

    #[test]
    fn test_headings() {
        // Arrange & Act & Assert
        assert_eq!(Listing::Popular.heading(), "Popular Movies");
        assert_eq!(Listing::TopRated.heading(), "Top Rated Movies");
        assert_eq!(Listing::Upcoming.heading(), "Upcoming Movies");
        assert_eq!(Listing::Search.heading(), "Search Results");
        assert_eq!(Listing::Search.family(), Family::Search);
    }
}
