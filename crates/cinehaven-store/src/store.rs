//! Async dispatcher owning the store state.

use std::sync::Arc;

use anyhow::Result;
use cinehaven_api::tmdb::TmdbApi;
use tokio::sync::mpsc;
use tracing::debug;

use crate::event::{Event, Payload, Request, Ticket};
use crate::model::CastMember;
use crate::reducer::reduce;
use crate::state::StoreState;

/// Explicit store context.
///
/// Requests run on spawned tasks and report back through an internal
/// channel; the caller drains that channel with [`Store::next_event`] so all
/// state changes happen on the caller's task.
pub struct Store<A> {
    api: Arc<A>,
    state: StoreState,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl<A> std::fmt::Debug for Store<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<A> Store<A>
where
    A: TmdbApi + Send + Sync + 'static,
{
    /// Creates a store with the initial state.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::with_shared(Arc::new(api))
    }

    /// Creates a store sharing an existing API handle.
    #[must_use]
    pub fn with_shared(api: Arc<A>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            state: StoreState::default(),
            tx,
            rx,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &StoreState {
        &self.state
    }

    /// Issues `request`.
    ///
    /// The family is marked pending immediately. The response is applied
    /// once it is received through [`Store::next_event`].
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&mut self, request: Request) -> Ticket {
        let ticket = self.state.next_ticket(request.family());
        debug!(?request, generation = ticket.generation, "dispatching request");
        self.apply(Event::Pending(ticket));

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match fetch(api.as_ref(), request).await {
                Ok(payload) => Event::Fulfilled(ticket, payload),
                Err(e) => Event::Rejected(ticket, format!("{e:#}")),
            };
            if tx.send(event).is_err() {
                debug!(family = %ticket.family, "store dropped before response arrived");
            }
        });
        ticket
    }

    /// Applies `event` and reports whether the state changed.
    ///
    /// Every accepted event moves the family's tracker (a newer generation,
    /// or a status leaving `Pending`), so only the tracker is compared.
    pub fn apply(&mut self, event: Event) -> bool {
        let ticket = event.ticket();
        let tracker_before = self.state.tracker(ticket.family).clone();
        self.state = reduce(std::mem::take(&mut self.state), event);
        let changed = self.state.tracker(ticket.family) != &tracker_before;
        if !changed {
            debug!(
                family = %ticket.family,
                generation = ticket.generation,
                "ignored stale event"
            );
        }
        changed
    }

    /// Waits for the next response and applies it.
    ///
    /// Returns whether the state changed. Cancel-safe.
    pub async fn next_event(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => self.apply(event),
            None => false,
        }
    }

    /// Applies responses until no family is pending.
    pub async fn settle(&mut self) {
        while self.state.any_loading() {
            self.next_event().await;
        }
    }
}

async fn fetch<A>(api: &A, request: Request) -> Result<Payload>
where
    A: TmdbApi + Sync,
{
    let payload = match request {
        Request::Popular { page } => Payload::Popular(api.popular_movies(page).await?.into()),
        Request::TopRated { page } => Payload::TopRated(api.top_rated_movies(page).await?.into()),
        Request::Upcoming { page } => Payload::Upcoming(api.upcoming_movies(page).await?.into()),
        Request::Search { query } => Payload::Search(api.search_movies(&query).await?.into()),
        Request::Detail { movie_id } => Payload::Detail(api.movie_details(movie_id).await?.into()),
        Request::Cast { movie_id } => {
            let cast = api.movie_credits(movie_id).await?;
            Payload::Cast(cast.into_iter().map(CastMember::from).collect())
        }
    };
    Ok(payload)
}
