//! Listing page view model.

use cinehaven_api::image::poster_url;
use cinehaven_store::{MovieSummary, Status, StoreState};

use super::{Listing, PageBody, Pagination};

/// A movie card in a listing grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    /// TMDB movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Secondary line, `Movie ID: {id}`.
    pub caption: String,
    /// Poster URL or placeholder.
    pub poster_url: String,
}

impl From<&MovieSummary> for MovieCard {
    fn from(movie: &MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            caption: format!("Movie ID: {}", movie.id),
            poster_url: poster_url(movie.poster_path.as_deref()),
        }
    }
}

/// Grid content plus pagination controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingView {
    /// Cards in display order.
    pub cards: Vec<MovieCard>,
    /// Local page number.
    pub page: u32,
    /// Whether "Previous" is enabled.
    pub previous_enabled: bool,
}

/// Returns the movies backing `listing`.
#[must_use]
pub fn movies(state: &StoreState, listing: Listing) -> &[MovieSummary] {
    match listing {
        Listing::Popular => state.popular.data(),
        Listing::TopRated => state.top_rated.data(),
        Listing::Upcoming => state.upcoming.data(),
        Listing::Search => state.search_results.data(),
    }
}

/// Builds the body of a listing page.
#[must_use]
pub fn listing_view(
    state: &StoreState,
    listing: Listing,
    pagination: Pagination,
) -> PageBody<ListingView> {
    match state.status(listing.family()) {
        Status::Pending => PageBody::Loading,
        Status::Failed(message) => PageBody::Failed(message.clone()),
        Status::Idle | Status::Succeeded => PageBody::Ready(ListingView {
            cards: movies(state, listing).iter().map(MovieCard::from).collect(),
            page: pagination.current(),
            previous_enabled: pagination.previous_enabled(),
        }),
    }
}
