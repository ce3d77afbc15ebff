//! Navigation bar state.

use crate::route::Route;

/// Terminal width (columns) below which links collapse behind the menu.
pub const MD_BREAKPOINT: u16 = 80;

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Key that activates the link.
    pub key: char,
    /// Link label.
    pub label: &'static str,
    /// Destination.
    pub route: Route,
}

/// Returns the navigation links in display order.
#[must_use]
pub fn links() -> [NavLink; 3] {
    [
        NavLink {
            key: '1',
            label: "Popular",
            route: Route::Popular,
        },
        NavLink {
            key: '2',
            label: "Top Rated",
            route: Route::TopRated,
        },
        NavLink {
            key: '3',
            label: "Upcoming",
            route: Route::Upcoming,
        },
    ]
}

/// Search input text and collapsed-menu flag.
#[derive(Debug, Clone, Default)]
pub struct Navbar {
    input: String,
    menu_open: bool,
}

impl Navbar {
    /// Returns the current search input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Appends a character to the search input.
    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    /// Removes the last character of the search input.
    pub fn pop(&mut self) {
        self.input.pop();
    }

    /// Whether the collapsed menu is open.
    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Opens or closes the collapsed menu.
    pub const fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Closes the collapsed menu.
    pub const fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Whether links are shown at the given terminal width.
    #[must_use]
    pub const fn links_visible(&self, width: u16) -> bool {
        width >= MD_BREAKPOINT || self.menu_open
    }

    /// Returns the search route for the trimmed input.
    ///
    /// Blank input yields `None`. The input is kept as typed.
    #[must_use]
    pub fn submit(&self) -> Option<Route> {
        let query = self.input.trim();
        if query.is_empty() {
            return None;
        }
        Some(Route::Search(String::from(query)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_trims_input() {
        // Arrange
        let mut navbar = Navbar::default();
        for c in "  batman ".chars() {
            navbar.push(c);
        }

        // Act
        let route = navbar.submit();

        // Assert
        assert_eq!(route, Some(Route::Search(String::from("batman"))));
        assert_eq!(navbar.input(), "  batman ");
    }

    #[test]
    fn test_submit_blank_is_noop() {
        // Arrange
        let mut navbar = Navbar::default();
        navbar.push(' ');
        navbar.push('\t');

        // Act & Assert
        assert_eq!(navbar.submit(), None);
    }

    #[test]
    fn test_pop_on_empty_input() {
        // Arrange
        let mut navbar = Navbar::default();

        // Act
        navbar.pop();

        // Assert
        assert_eq!(navbar.input(), "");
    }

    #[test]
    fn test_links_collapse_below_breakpoint() {
        // Arrange
        let mut navbar = Navbar::default();

        // Act & Assert
        assert!(navbar.links_visible(MD_BREAKPOINT));
        assert!(!navbar.links_visible(79));
        navbar.toggle_menu();
        assert!(navbar.links_visible(40));
        navbar.close_menu();
        assert!(!navbar.is_menu_open());
    }

    #[test]
    fn test_links_order() {
        // Arrange & Act
        let links = links();

        // Assert
        let routes: Vec<Route> = links.into_iter().map(|l| l.route).collect();
        assert_eq!(routes, vec![Route::Popular, Route::TopRated, Route::Upcoming]);
    }
}
