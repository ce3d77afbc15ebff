//! TMDB API response types.
//!
//! Only the fields rendered by cinehaven are modelled. Unknown fields are
//! ignored and most fields default when absent, since TMDB omits or nulls
//! them for sparse catalog entries.

use serde::Deserialize;

// --- Movie lists (popular / top_rated / upcoming / search) ---

/// Paged response from the movie list and `search/movie` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieList {
    /// Current page number.
    pub page: u32,
    /// Movies on this page.
    pub results: Vec<TmdbMovieSummary>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A single movie within a list response.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path (e.g. `/abc.jpg`).
    #[serde(default)]
    pub poster_path: Option<String>,
}

// --- Movie details ---

/// Response from `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Genres in display order.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- Credits ---

/// Response from `movie/{movie_id}/credits` endpoint.
///
/// The `crew` array is not modelled and is skipped during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCredits {
    /// TMDB movie ID.
    #[serde(default)]
    pub id: u64,
    /// Billed cast, in credit order.
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
}

/// A single cast credit.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Performer name.
    pub name: String,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
    /// Character played.
    #[serde(default)]
    pub character: String,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}
