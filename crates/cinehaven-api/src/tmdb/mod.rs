//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! and retrieves movie listings, details, and credits.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_LANGUAGE, TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    TmdbCastMember, TmdbCredits, TmdbErrorResponse, TmdbGenre, TmdbMovieDetails, TmdbMovieList,
    TmdbMovieSummary,
};
