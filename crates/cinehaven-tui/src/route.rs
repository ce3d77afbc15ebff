//! In-app routes.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use url::Url;
use url::form_urlencoded;

/// Base used to resolve relative route paths.
const ROUTE_BASE: &str = "cinehaven://app/";

/// A location in the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Popular,
    /// `/top-rated`
    TopRated,
    /// `/upcoming`
    Upcoming,
    /// `/movie/{id}`
    Movie(u64),
    /// `/search?query={text}`
    Search(String),
}

impl Route {
    /// Parses a route path such as `/movie/550` or `/search?query=dune`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown paths or non-numeric movie IDs.
    pub fn parse(input: &str) -> Result<Self> {
        let base = Url::parse(ROUTE_BASE).context("invalid route base")?;
        let url = base
            .join(input.trim())
            .with_context(|| format!("invalid route: {input}"))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Ok(Self::Popular),
            ["top-rated"] => Ok(Self::TopRated),
            ["upcoming"] => Ok(Self::Upcoming),
            ["movie", id] => {
                let id = id
                    .parse::<u64>()
                    .with_context(|| format!("invalid movie id: {id}"))?;
                Ok(Self::Movie(id))
            }
            ["search"] => {
                let query = url
                    .query_pairs()
                    .find(|(k, _)| k == "query")
                    .map(|(_, v)| v.into_owned())
                    .unwrap_or_default();
                Ok(Self::Search(query))
            }
            _ => bail!("unknown route: {input}"),
        }
    }

    /// Returns the route path with the search query percent-encoded.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Popular => String::from("/"),
            Self::TopRated => String::from("/top-rated"),
            Self::Upcoming => String::from("/upcoming"),
            Self::Movie(id) => format!("/movie/{id}"),
            Self::Search(query) => {
                let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
                format!("/search?query={encoded}")
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_static_routes() {
        // Arrange & Act & Assert
        assert_eq!(Route::parse("/").unwrap(), Route::Popular);
        assert_eq!(Route::parse("").unwrap(), Route::Popular);
        assert_eq!(Route::parse("/top-rated").unwrap(), Route::TopRated);
        assert_eq!(Route::parse("/upcoming/").unwrap(), Route::Upcoming);
    }

    #[test]
    fn test_parse_movie() {
        // Arrange & Act
        let route = Route::parse("/movie/550").unwrap();

        // Assert
        assert_eq!(route, Route::Movie(550));
    }

    #[test]
    fn test_parse_movie_non_numeric_is_error() {
        // Arrange & Act
        let result = Route::parse("/movie/abc");

        // Assert
        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("invalid movie id"), "unexpected: {msg}");
    }

    #[test]
    fn test_parse_unknown_is_error() {
        // Arrange & Act
        let result = Route::parse("/tv/1399");

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_search_decodes_query() {
        // Arrange & Act
        let route = Route::parse("/search?query=the%20dark+knight").unwrap();

        // Assert
        assert_eq!(route, Route::Search(String::from("the dark knight")));
    }

    #[test]
    fn test_parse_search_without_query() {
        // Arrange & Act
        let route = Route::parse("/search").unwrap();

        // Assert
        assert_eq!(route, Route::Search(String::new()));
    }

    #[test]
    fn test_path_encodes_query() {
        // Arrange
        let route = Route::Search(String::from("amélie & co"));

        // Act
        let path = route.path();

        // Assert
        assert_eq!(path, "/search?query=am%C3%A9lie+%26+co");
        assert_eq!(Route::parse(&path).unwrap(), route);
    }

    #[test]
    fn test_display_and_from_str() {
        // Arrange
        let route: Route = "/movie/693134".parse().unwrap();

        // Act & Assert
        assert_eq!(route.to_string(), "/movie/693134");
    }
}
