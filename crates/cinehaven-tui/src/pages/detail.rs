//! Movie detail page view model.

use cinehaven_api::image::{backdrop_url, poster_url, profile_url};
use cinehaven_store::{CastMember, Family, MovieDetail, StoreState};

use super::PageBody;

/// A cast card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastCard {
    /// Performer name.
    pub name: String,
    /// Role line, `as {character}`.
    pub role: String,
    /// Profile photo URL or placeholder.
    pub profile_url: String,
}

impl From<&CastMember> for CastCard {
    fn from(member: &CastMember) -> Self {
        Self {
            name: member.name.clone(),
            role: format!("as {}", member.character),
            profile_url: profile_url(member.profile_path.as_deref()),
        }
    }
}

/// Detail page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// TMDB movie ID.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Backdrop URL (original size) or placeholder.
    pub backdrop_url: String,
    /// Poster URL or placeholder.
    pub poster_url: String,
    /// Vote average with two decimals.
    pub rating: String,
    /// Runtime as `{n} min`, when known.
    pub runtime: Option<String>,
    /// Genre names joined by `, `.
    pub genres: String,
    /// Release date as returned by the API.
    pub release_date: String,
    /// Overview text.
    pub overview: String,
    /// Cast cards in credit order.
    pub cast: Vec<CastCard>,
}

impl DetailView {
    /// Formats a detail record and its cast for display.
    #[must_use]
    pub fn new(detail: &MovieDetail, cast: &[CastMember]) -> Self {
        Self {
            id: detail.id,
            title: detail.title.clone(),
            backdrop_url: backdrop_url(detail.backdrop_path.as_deref()),
            poster_url: poster_url(detail.poster_path.as_deref()),
            rating: format!("{:.2}", detail.vote_average),
            runtime: detail.runtime_minutes.map(|n| format!("{n} min")),
            genres: detail
                .genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            release_date: detail.release_date.clone(),
            overview: detail.overview.clone(),
            cast: cast.iter().map(CastCard::from).collect(),
        }
    }
}

/// Builds the body of the detail page for `movie_id`.
///
/// The selected detail is shown only when it belongs to `movie_id`; a
/// leftover record from a previously opened movie yields `NoData`.
#[must_use]
pub fn detail_view(state: &StoreState, movie_id: u64) -> PageBody<DetailView> {
    if state.is_loading(Family::Detail) || state.is_loading(Family::Cast) {
        return PageBody::Loading;
    }
    if let Some(message) = state
        .error(Family::Detail)
        .or_else(|| state.error(Family::Cast))
    {
        return PageBody::Failed(String::from(message));
    }
    match state.selected.data() {
        Some(detail) if detail.id == movie_id => {
            PageBody::Ready(DetailView::new(detail, state.cast.data()))
        }
        _ => PageBody::NoData,
    }
}
