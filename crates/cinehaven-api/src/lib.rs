//! API client library for cinehaven.
//!
//! Provides the TMDB API client and image CDN URL helpers.

/// TMDB image CDN URL construction.
pub mod image;

/// TMDB API client.
pub mod tmdb;
