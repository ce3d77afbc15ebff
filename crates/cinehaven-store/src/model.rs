//! Domain records built from TMDB responses.

use cinehaven_api::tmdb::{
    TmdbCastMember, TmdbGenre, TmdbMovieDetails, TmdbMovieList, TmdbMovieSummary,
};

/// Minimal listing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Poster path fragment. Empty paths are stored as `None`.
    pub poster_path: Option<String>,
}

/// Full record for a single movie page.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    /// TMDB movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Poster path fragment.
    pub poster_path: Option<String>,
    /// Backdrop path fragment.
    pub backdrop_path: Option<String>,
    /// Overview text (empty when absent).
    pub overview: String,
    /// Release date as returned by the API (empty when absent).
    pub release_date: String,
    /// Vote average.
    pub vote_average: f64,
    /// Runtime in minutes.
    pub runtime_minutes: Option<u32>,
    /// Genres in display order.
    pub genres: Vec<Genre>,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Cast credit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Performer name.
    pub name: String,
    /// Profile photo path fragment.
    pub profile_path: Option<String>,
    /// Character played.
    pub character: String,
}

/// One page of a movie listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoviePage {
    /// Page number reported by the API.
    pub page: u32,
    /// Total pages reported by the API.
    pub total_pages: u32,
    /// Movies on this page.
    pub results: Vec<MovieSummary>,
}

/// Drops empty path fragments.
fn non_empty(path: Option<String>) -> Option<String> {
    path.filter(|p| !p.is_empty())
}

impl From<TmdbMovieSummary> for MovieSummary {
    fn from(m: TmdbMovieSummary) -> Self {
        Self {
            id: m.id,
            title: m.title,
            poster_path: non_empty(m.poster_path),
        }
    }
}

impl From<TmdbMovieList> for MoviePage {
    fn from(list: TmdbMovieList) -> Self {
        Self {
            page: list.page,
            total_pages: list.total_pages,
            results: list.results.into_iter().map(MovieSummary::from).collect(),
        }
    }
}

impl From<TmdbGenre> for Genre {
    fn from(g: TmdbGenre) -> Self {
        Self {
            id: g.id,
            name: g.name,
        }
    }
}

impl From<TmdbMovieDetails> for MovieDetail {
    fn from(d: TmdbMovieDetails) -> Self {
        Self {
            id: d.id,
            title: d.title,
            poster_path: non_empty(d.poster_path),
            backdrop_path: non_empty(d.backdrop_path),
            overview: d.overview.unwrap_or_default(),
            release_date: d.release_date.unwrap_or_default(),
            vote_average: d.vote_average,
            runtime_minutes: d.runtime,
            genres: d.genres.into_iter().map(Genre::from).collect(),
        }
    }
}

impl From<TmdbCastMember> for CastMember {
    fn from(c: TmdbCastMember) -> Self {
        Self {
            id: c.id,
            name: c.name,
            profile_path: non_empty(c.profile_path),
            character: c.character,
        }
    }
}
