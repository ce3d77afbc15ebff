//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{TmdbCastMember, TmdbMovieDetails, TmdbMovieList};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
/// Each call performs exactly one HTTP request.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches a page of popular movies.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` is 0, or the HTTP request or JSON parsing fails.
    async fn popular_movies(&self, page: u32) -> Result<TmdbMovieList>;

    /// Fetches a page of top-rated movies.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` is 0, or the HTTP request or JSON parsing fails.
    async fn top_rated_movies(&self, page: u32) -> Result<TmdbMovieList>;

    /// Fetches a page of upcoming movies.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` is 0, or the HTTP request or JSON parsing fails.
    async fn upcoming_movies(&self, page: u32) -> Result<TmdbMovieList>;

    /// Searches movies by title text. Only the first page is requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movies(&self, query: &str) -> Result<TmdbMovieList>;

    /// Fetches full details for a single movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<TmdbMovieDetails>;

    /// Fetches the cast of a movie. Crew entries are discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_credits(&self, movie_id: u64) -> Result<Vec<TmdbCastMember>>;
}
