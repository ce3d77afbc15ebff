//! Application controller: route, history, page-local state and fetching.

use cinehaven_api::image::poster_url;
use cinehaven_api::tmdb::TmdbApi;
use cinehaven_store::{MovieSummary, Request, Store, StoreState};
use tracing::debug;

use crate::navbar::Navbar;
use crate::pages::{self, DetailView, Listing, ListingView, PageBody, Pagination, grid_columns};
use crate::route::Route;

/// Which widget receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Page navigation.
    #[default]
    Browse,
    /// Navbar search box.
    Search,
}

/// What a mounted page fetched. A page refetches only when this changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchKey {
    /// Popular listing page.
    Popular {
        /// Local page number.
        page: u32,
    },
    /// Top-rated listing page.
    TopRated {
        /// Local page number.
        page: u32,
    },
    /// Upcoming listing page.
    Upcoming {
        /// Local page number.
        page: u32,
    },
    /// Search results (unpaged).
    Search {
        /// Query text.
        query: String,
    },
    /// Movie detail and cast.
    Movie {
        /// TMDB movie ID.
        id: u64,
    },
}

impl FetchKey {
    /// Requests issued when this key is mounted.
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        match self {
            Self::Popular { page } => vec![Request::Popular { page: *page }],
            Self::TopRated { page } => vec![Request::TopRated { page: *page }],
            Self::Upcoming { page } => vec![Request::Upcoming { page: *page }],
            Self::Search { query } => vec![Request::Search {
                query: query.clone(),
            }],
            Self::Movie { id } => vec![
                Request::Detail { movie_id: *id },
                Request::Cast { movie_id: *id },
            ],
        }
    }
}

/// Content of the current page.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// A grid listing.
    Listing {
        /// Which listing.
        listing: Listing,
        /// Page body.
        body: PageBody<ListingView>,
    },
    /// A movie detail page.
    Movie {
        /// Movie ID from the route.
        id: u64,
        /// Page body.
        body: PageBody<DetailView>,
    },
}

/// Returns the listing shown for `route`, if any.
#[must_use]
pub const fn listing_for(route: &Route) -> Option<Listing> {
    match route {
        Route::Popular => Some(Listing::Popular),
        Route::TopRated => Some(Listing::TopRated),
        Route::Upcoming => Some(Listing::Upcoming),
        Route::Search(_) => Some(Listing::Search),
        Route::Movie(_) => None,
    }
}

/// Browser application state.
#[derive(Debug)]
pub struct App<A> {
    store: Store<A>,
    route: Route,
    history: Vec<Route>,
    navbar: Navbar,
    pagination: Pagination,
    cursor: usize,
    columns: usize,
    focus: Focus,
    mounted: Option<FetchKey>,
    quit: bool,
}

impl<A> App<A>
where
    A: TmdbApi + Send + Sync + 'static,
{
    /// Creates the app at `route`. Call [`App::sync`] to start fetching.
    #[must_use]
    pub fn new(store: Store<A>, route: Route) -> Self {
        Self {
            store,
            route,
            history: Vec::new(),
            navbar: Navbar::default(),
            pagination: Pagination::default(),
            cursor: 0,
            columns: 1,
            focus: Focus::Browse,
            mounted: None,
            quit: false,
        }
    }

    /// Store state.
    #[must_use]
    pub const fn state(&self) -> &StoreState {
        self.store.state()
    }

    /// Current route.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Navbar state.
    #[must_use]
    pub const fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    /// Mutable navbar state.
    pub const fn navbar_mut(&mut self) -> &mut Navbar {
        &mut self.navbar
    }

    /// Local pagination of the current page.
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Current input focus.
    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// Moves input focus.
    pub const fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    /// Grid column count currently used for cursor movement.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Updates the grid column count from the terminal width.
    pub const fn set_viewport_width(&mut self, width: u16) {
        self.columns = grid_columns(width);
    }

    /// Requests exit from the event loop.
    pub const fn quit(&mut self) {
        self.quit = true;
    }

    /// Whether the event loop should exit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.quit
    }

    /// Derives the fetch key of the current route and page.
    ///
    /// A search route with a blank query has nothing to fetch.
    #[must_use]
    pub fn fetch_key(&self) -> Option<FetchKey> {
        let page = self.pagination.current();
        match &self.route {
            Route::Popular => Some(FetchKey::Popular { page }),
            Route::TopRated => Some(FetchKey::TopRated { page }),
            Route::Upcoming => Some(FetchKey::Upcoming { page }),
            Route::Search(query) => {
                let query = query.trim();
                (!query.is_empty()).then(|| FetchKey::Search {
                    query: String::from(query),
                })
            }
            Route::Movie(id) => Some(FetchKey::Movie { id: *id }),
        }
    }

    /// Dispatches the current page's requests if its fetch key changed.
    ///
    /// Returns whether anything was dispatched.
    pub fn sync(&mut self) -> bool {
        let key = self.fetch_key();
        if key == self.mounted {
            return false;
        }
        self.mounted.clone_from(&key);
        let Some(key) = key else {
            return false;
        };
        debug!(?key, route = %self.route, "fetching page data");
        for request in key.requests() {
            self.store.dispatch(request);
        }
        true
    }

    /// Re-issues the current page's requests.
    pub fn refresh(&mut self) {
        self.mounted = None;
        self.sync();
    }

    /// Navigates to `route`, pushing the current route onto the history.
    ///
    /// Navigating to the current route is a no-op.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        let previous = std::mem::replace(&mut self.route, route);
        self.history.push(previous);
        self.remount();
    }

    /// Returns to the previous route. Returns `false` when there is none.
    pub fn back(&mut self) -> bool {
        let Some(route) = self.history.pop() else {
            return false;
        };
        self.route = route;
        self.remount();
        true
    }

    fn remount(&mut self) {
        self.pagination = Pagination::default();
        self.cursor = 0;
        self.navbar.close_menu();
        self.sync();
    }

    /// Submits the navbar search and navigates to its results.
    pub fn submit_search(&mut self) {
        if let Some(route) = self.navbar.submit() {
            self.focus = Focus::Browse;
            self.navigate(route);
        }
    }

    /// Advances the listing page.
    pub fn next_page(&mut self) {
        if listing_for(&self.route).is_some() {
            self.pagination.next();
            self.cursor = 0;
            self.sync();
        }
    }

    /// Goes back one listing page.
    pub fn previous_page(&mut self) {
        if listing_for(&self.route).is_some() && self.pagination.previous_enabled() {
            self.pagination.previous();
            self.cursor = 0;
            self.sync();
        }
    }

    /// Jumps to a listing page (clamped to at least 1).
    pub fn go_to_page(&mut self, page: u32) {
        if listing_for(&self.route).is_some() {
            self.pagination.go_to(page);
            self.cursor = 0;
            self.sync();
        }
    }

    /// Whether the route is a search with nothing to search for.
    fn is_blank_search(&self) -> bool {
        matches!(&self.route, Route::Search(query) if query.trim().is_empty())
    }

    fn movies(&self) -> &[MovieSummary] {
        if self.is_blank_search() {
            return &[];
        }
        match listing_for(&self.route) {
            Some(listing) => pages::listing::movies(self.store.state(), listing),
            None => &[],
        }
    }

    /// Index of the card under the cursor, clamped to the current grid.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        let len = self.movies().len();
        (len > 0).then(|| self.cursor.min(len.saturating_sub(1)))
    }

    /// Moves the cursor one card left.
    pub fn move_left(&mut self) {
        if let Some(index) = self.selected_index() {
            self.cursor = index.saturating_sub(1);
        }
    }

    /// Moves the cursor one card right.
    pub fn move_right(&mut self) {
        let len = self.movies().len();
        if let Some(index) = self.selected_index() {
            self.cursor = index.saturating_add(1).min(len.saturating_sub(1));
        }
    }

    /// Moves the cursor one row up.
    pub fn move_up(&mut self) {
        if let Some(index) = self.selected_index() {
            self.cursor = index.checked_sub(self.columns).unwrap_or(index);
        }
    }

    /// Moves the cursor one row down.
    pub fn move_down(&mut self) {
        let len = self.movies().len();
        if let Some(index) = self.selected_index() {
            let below = index.saturating_add(self.columns);
            self.cursor = if below < len { below } else { index };
        }
    }

    /// Opens the detail page of the card under the cursor.
    pub fn open_selected(&mut self) {
        let id = self
            .selected_index()
            .and_then(|i| self.movies().get(i))
            .map(|m| m.id);
        if let Some(id) = id {
            self.navigate(Route::Movie(id));
        }
    }

    /// Poster URL of the focused movie, if any.
    #[must_use]
    pub fn selected_poster_url(&self) -> Option<String> {
        match &self.route {
            Route::Movie(id) => self
                .store
                .state()
                .selected
                .data()
                .as_ref()
                .filter(|d| d.id == *id)
                .map(|d| poster_url(d.poster_path.as_deref())),
            _ => self
                .selected_index()
                .and_then(|i| self.movies().get(i))
                .map(|m| poster_url(m.poster_path.as_deref())),
        }
    }

    /// Builds the current page content.
    #[must_use]
    pub fn view(&self) -> View {
        let state = self.store.state();
        let listing = |listing: Listing| View::Listing {
            listing,
            body: pages::listing_view(state, listing, self.pagination),
        };
        match &self.route {
            Route::Popular => listing(Listing::Popular),
            Route::TopRated => listing(Listing::TopRated),
            Route::Upcoming => listing(Listing::Upcoming),
            // Results left over from an earlier query are not shown.
            Route::Search(_) if self.is_blank_search() => View::Listing {
                listing: Listing::Search,
                body: PageBody::Ready(ListingView {
                    cards: Vec::new(),
                    page: self.pagination.current(),
                    previous_enabled: self.pagination.previous_enabled(),
                }),
            },
            Route::Search(_) => listing(Listing::Search),
            Route::Movie(id) => View::Movie {
                id: *id,
                body: pages::detail_view(state, *id),
            },
        }
    }

    /// Waits for the next store response and applies it.
    pub async fn next_event(&mut self) -> bool {
        self.store.next_event().await
    }

    /// Applies responses until nothing is pending.
    pub async fn settle(&mut self) {
        self.store.settle().await;
    }
}
