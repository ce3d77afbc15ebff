//! Pure state transitions.

use crate::event::{Event, Payload};
use crate::state::{Status, StoreState};

/// Applies `event` to `state` and returns the next state.
///
/// Outcomes are applied only when their ticket is the latest issued request
/// of the family and that family is still pending. Anything else is stale and
/// leaves the state unchanged.
#[must_use]
pub fn reduce(mut state: StoreState, event: Event) -> StoreState {
    match event {
        Event::Pending(ticket) => {
            let tracker = state.tracker_mut(ticket.family);
            if ticket.generation > tracker.generation {
                tracker.generation = ticket.generation;
                tracker.status = Status::Pending;
            }
        }
        Event::Fulfilled(ticket, payload) => {
            if state.is_current(ticket) && payload.family() == ticket.family {
                store_payload(&mut state, payload);
                state.tracker_mut(ticket.family).status = Status::Succeeded;
            }
        }
        Event::Rejected(ticket, message) => {
            if state.is_current(ticket) {
                let message = if message.trim().is_empty() {
                    format!("Failed to fetch {}", ticket.family.label())
                } else {
                    message
                };
                state.tracker_mut(ticket.family).status = Status::Failed(message);
            }
        }
    }
    state
}

fn store_payload(state: &mut StoreState, payload: Payload) {
    match payload {
        Payload::Popular(page) => {
            state.page = page.page;
            state.popular.data = page.results;
        }
        Payload::TopRated(page) => state.top_rated.data = page.results,
        Payload::Upcoming(page) => state.upcoming.data = page.results,
        Payload::Search(page) => state.search_results.data = page.results,
        Payload::Detail(detail) => state.selected.data = Some(detail),
        Payload::Cast(cast) => state.cast.data = cast,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::event::{Family, Ticket};
    use crate::model::{CastMember, MovieDetail, MoviePage, MovieSummary};

    fn summary(id: u64, title: &str, poster: Option<&str>) -> MovieSummary {
        MovieSummary {
            id,
            title: String::from(title),
            poster_path: poster.map(String::from),
        }
    }

    fn page_of(page: u32, results: Vec<MovieSummary>) -> MoviePage {
        MoviePage {
            page,
            total_pages: 10,
            results,
        }
    }

    fn pending(state: StoreState, family: Family) -> (StoreState, Ticket) {
        let ticket = state.next_ticket(family);
        (reduce(state, Event::Pending(ticket)), ticket)
    }

    #[test]
    fn test_pending_sets_loading() {
        // Arrange
        let state = StoreState::default();

        // Act
        let (state, ticket) = pending(state, Family::Popular);

        // Assert
        assert_eq!(ticket.generation, 1);
        assert!(state.is_loading(Family::Popular));
        assert!(state.any_loading());
    }

    #[test]
    fn test_popular_fulfilled_stores_results_and_page() {
        // Arrange
        let (state, ticket) = pending(StoreState::default(), Family::Popular);
        let payload = Payload::Popular(page_of(1, vec![summary(5, "X", Some("/p.jpg"))]));

        // Act
        let state = reduce(state, Event::Fulfilled(ticket, payload));

        // Assert
        assert_eq!(state.popular.data().len(), 1);
        assert_eq!(state.popular.data()[0].id, 5);
        assert_eq!(state.popular.data()[0].title, "X");
        assert_eq!(state.page, 1);
        assert!(!state.is_loading(Family::Popular));
        assert_eq!(state.status(Family::Popular), &Status::Succeeded);
    }

    #[test]
    fn test_popular_page_tracks_response_page() {
        // Arrange
        let (state, ticket) = pending(StoreState::default(), Family::Popular);

        // Act
        let state = reduce(
            state,
            Event::Fulfilled(ticket, Payload::Popular(page_of(3, Vec::new()))),
        );

        // Assert
        assert_eq!(state.page, 3);
    }

    #[test]
    fn test_other_listings_do_not_touch_page() {
        // Arrange
        let (state, ticket) = pending(StoreState::default(), Family::TopRated);

        // Act
        let state = reduce(
            state,
            Event::Fulfilled(ticket, Payload::TopRated(page_of(4, vec![summary(1, "A", None)]))),
        );

        // Assert
        assert_eq!(state.page, 1);
        assert_eq!(state.top_rated.data().len(), 1);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        // Arrange: two searches issued, the second resolves first.
        let (state, first) = pending(StoreState::default(), Family::Search);
        let (state, second) = pending(state, Family::Search);
        let state = reduce(
            state,
            Event::Fulfilled(
                second,
                Payload::Search(page_of(1, vec![summary(2, "Second", None)])),
            ),
        );

        // Act
        let state = reduce(
            state,
            Event::Fulfilled(
                first,
                Payload::Search(page_of(1, vec![summary(1, "First", None)])),
            ),
        );

        // Assert
        assert_eq!(state.search_results.data()[0].title, "Second");
        assert_eq!(state.status(Family::Search), &Status::Succeeded);
    }

    #[test]
    fn test_stale_response_does_not_end_newer_pending() {
        // Arrange
        let (state, first) = pending(StoreState::default(), Family::Upcoming);
        let (state, _second) = pending(state, Family::Upcoming);

        // Act
        let state = reduce(state, Event::Rejected(first, String::from("old")));

        // Assert
        assert!(state.is_loading(Family::Upcoming));
        assert_eq!(state.error(Family::Upcoming), None);
    }

    #[test]
    fn test_failed_search_keeps_previous_results() {
        // Arrange
        let (state, ticket) = pending(StoreState::default(), Family::Search);
        let state = reduce(
            state,
            Event::Fulfilled(
                ticket,
                Payload::Search(page_of(1, vec![summary(268, "Batman", None)])),
            ),
        );
        let (state, ticket) = pending(state, Family::Search);

        // Act
        let state = reduce(state, Event::Rejected(ticket, String::from("HTTP 500")));

        // Assert
        assert_eq!(state.search_results.data().len(), 1);
        assert_eq!(state.error(Family::Search), Some("HTTP 500"));
        assert!(!state.is_loading(Family::Search));
    }

    #[test]
    fn test_empty_rejection_uses_fallback_message() {
        // Arrange
        let (state, ticket) = pending(StoreState::default(), Family::Cast);

        // Act
        let state = reduce(state, Event::Rejected(ticket, String::new()));

        // Assert
        assert_eq!(state.error(Family::Cast), Some("Failed to fetch cast details"));
    }

    #[test]
    fn test_unrelated_families_untouched() {
        // Arrange
        let (state, ticket) = pending(StoreState::default(), Family::Detail);
        let before = state.clone();

        // Act
        let state = reduce(state, Event::Rejected(ticket, String::from("nope")));

        // Assert
        assert_eq!(state.popular, before.popular);
        assert_eq!(state.top_rated, before.top_rated);
        assert_eq!(state.upcoming, before.upcoming);
        assert_eq!(state.search_results, before.search_results);
        assert_eq!(state.cast, before.cast);
        assert_eq!(state.page, before.page);
    }

    #[test]
    fn test_duplicate_outcome_ignored() {
        // Arrange
        let (state, ticket) = pending(StoreState::default(), Family::Cast);
        let cast = vec![CastMember {
            id: 819,
            name: String::from("Edward Norton"),
            profile_path: None,
            character: String::from("The Narrator"),
        }];
        let state = reduce(state, Event::Fulfilled(ticket, Payload::Cast(cast)));

        // Act
        let state = reduce(state, Event::Rejected(ticket, String::from("late")));

        // Assert
        assert_eq!(state.status(Family::Cast), &Status::Succeeded);
        assert_eq!(state.cast.data().len(), 1);
    }

    #[test]
    fn test_mismatched_payload_ignored() {
        // Arrange
        let (state, ticket) = pending(StoreState::default(), Family::Popular);

        // Act
        let state = reduce(
            state,
            Event::Fulfilled(ticket, Payload::Upcoming(page_of(1, vec![summary(1, "A", None)]))),
        );

        // Assert
        assert!(state.is_loading(Family::Popular));
        assert!(state.upcoming.data().is_empty());
    }

    #[test]
    fn test_detail_replaces_selected() {
        // Arrange
        let (state, ticket) = pending(StoreState::default(), Family::Detail);
        let detail = MovieDetail {
            id: 550,
            title: String::from("Fight Club"),
            poster_path: None,
            backdrop_path: None,
            overview: String::new(),
            release_date: String::from("1999-10-15"),
            vote_average: 8.433,
            runtime_minutes: Some(139),
            genres: Vec::new(),
        };

        // Act
        let state = reduce(state, Event::Fulfilled(ticket, Payload::Detail(detail)));

        // Assert
        let selected = state.selected.data().as_ref().map(|d| d.id);
        assert_eq!(selected, Some(550));
    }

    #[test]
    fn test_old_pending_does_not_rewind_generation() {
        // Arrange
        let (state, first) = pending(StoreState::default(), Family::Popular);
        let (state, second) = pending(state, Family::Popular);

        // Act
        let state = reduce(state, Event::Pending(first));

        // Assert
        assert!(state.is_current(second));
        assert!(!state.is_current(first));
    }
}
