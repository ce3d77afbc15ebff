//! TUI rendering for the movie browser.

use std::iter;

use cinehaven_api::tmdb::TmdbApi;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{App, Focus, View};
use crate::navbar::links;
use crate::pages::{DetailView, ListingView, MovieCard, PageBody};

/// Rows taken by one movie card, borders included.
const CARD_HEIGHT: u16 = 5;

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw<A>(frame: &mut Frame, app: &App<A>)
where
    A: TmdbApi + Send + Sync + 'static,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // navbar
            Constraint::Min(5),    // page body
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    let view = app.view();
    draw_navbar(frame, chunks[0], app);
    draw_body(frame, chunks[1], app, &view);
    draw_footer(frame, chunks[2], app, &view);
}

/// Draws the brand, links and search box.
#[allow(clippy::indexing_slicing)]
fn draw_navbar<A>(frame: &mut Frame, area: Rect, app: &App<A>)
where
    A: TmdbApi + Send + Sync + 'static,
{
    let nav_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let navbar = app.navbar();
    let line = if navbar.links_visible(area.width) {
        let mut spans = Vec::new();
        for link in links() {
            let style = if link.route == *app.route() {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!("{} {}", link.key, link.label), style));
            spans.push(Span::raw("  "));
        }
        Line::from(spans)
    } else {
        Line::from(Span::styled(
            "m: menu",
            Style::default().fg(Color::DarkGray),
        ))
    };
    let nav = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Cinehaven "));
    frame.render_widget(nav, nav_chunks[0]);

    let search_style = if app.focus() == Focus::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(navbar.input())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, nav_chunks[1]);
}

/// Draws the page body for the current view.
fn draw_body<A>(frame: &mut Frame, area: Rect, app: &App<A>, view: &View)
where
    A: TmdbApi + Send + Sync + 'static,
{
    let title = match view {
        View::Listing { listing, .. } => format!(" {} ", listing.heading()),
        View::Movie { id, .. } => format!(" Movie {id} "),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let content = block.inner(area);
    frame.render_widget(block, area);

    match view {
        View::Listing { body, .. } => match body {
            PageBody::Ready(listing) => draw_grid(frame, content, app, listing),
            other => draw_status(frame, content, other),
        },
        View::Movie { body, .. } => match body {
            PageBody::Ready(detail) => draw_detail(frame, content, detail),
            other => draw_status(frame, content, other),
        },
    }
}

/// Draws a loading, error or empty message.
fn draw_status<T>(frame: &mut Frame, area: Rect, body: &PageBody<T>) {
    let (text, style) = match body {
        PageBody::Loading => (String::from("Loading..."), Style::default().fg(Color::Yellow)),
        PageBody::Failed(message) => (format!("Error: {message}"), Style::default().fg(Color::Red)),
        PageBody::NoData | PageBody::Ready(_) => (
            String::from("No movie data available"),
            Style::default().fg(Color::DarkGray),
        ),
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Draws the card grid, scrolled so the selected card is visible.
fn draw_grid<A>(frame: &mut Frame, area: Rect, app: &App<A>, listing: &ListingView)
where
    A: TmdbApi + Send + Sync + 'static,
{
    let columns = app.columns().max(1);
    let selected = app.selected_index();
    let visible_rows = usize::from(area.height.checked_div(CARD_HEIGHT).unwrap_or(0).max(1));
    let selected_row = selected
        .and_then(|i| i.checked_div(columns))
        .unwrap_or(0);
    let first_row = selected_row.saturating_sub(visible_rows.saturating_sub(1));

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(iter::repeat_n(Constraint::Length(CARD_HEIGHT), visible_rows))
        .split(area);
    let ratio = u32::try_from(columns).unwrap_or(1);

    let rows = listing.cards.chunks(columns).enumerate().skip(first_row);
    for (row_area, (row, cards)) in row_areas.iter().zip(rows) {
        let cell_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(iter::repeat_n(Constraint::Ratio(1, ratio), columns))
            .split(*row_area);
        for (col, (cell, card)) in cell_areas.iter().zip(cards).enumerate() {
            let index = row.saturating_mul(columns).saturating_add(col);
            draw_card(frame, *cell, card, selected == Some(index));
        }
    }
}

/// Draws one movie card.
fn draw_card(frame: &mut Frame, area: Rect, card: &MovieCard, is_selected: bool) {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let title_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let lines = vec![
        Line::from(Span::styled(card.title.clone(), title_style)),
        Line::from(card.caption.clone()),
        Line::from(Span::styled(
            card.poster_url.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);
}

/// Draws the movie hero, overview and cast.
fn draw_detail(frame: &mut Frame, area: Rect, detail: &DetailView) {
    let label = Style::default().fg(Color::DarkGray);
    let mut meta = vec![Span::styled("Rating: ", label), Span::raw(detail.rating.clone())];
    if let Some(runtime) = &detail.runtime {
        meta.push(Span::raw("  |  "));
        meta.push(Span::raw(runtime.clone()));
    }
    if !detail.genres.is_empty() {
        meta.push(Span::raw("  |  "));
        meta.push(Span::raw(detail.genres.clone()));
    }

    let mut lines = vec![
        Line::from(Span::styled(
            detail.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(meta),
        Line::from(vec![
            Span::styled("Released: ", label),
            Span::raw(detail.release_date.clone()),
        ]),
        Line::from(vec![
            Span::styled("Backdrop: ", label),
            Span::raw(detail.backdrop_url.clone()),
        ]),
        Line::from(vec![
            Span::styled("Poster:   ", label),
            Span::raw(detail.poster_url.clone()),
        ]),
        Line::default(),
        Line::from(detail.overview.clone()),
        Line::default(),
        Line::from(Span::styled(
            "Cast",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for member in &detail.cast {
        lines.push(Line::from(vec![
            Span::styled(
                member.name.clone(),
                Style::default().fg(Color::Green),
            ),
            Span::raw(" "),
            Span::raw(member.role.clone()),
            Span::raw("  "),
            Span::styled(member.profile_url.clone(), label),
        ]));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Draws pagination buttons and key hints.
fn draw_footer<A>(frame: &mut Frame, area: Rect, app: &App<A>, view: &View)
where
    A: TmdbApi + Send + Sync + 'static,
{
    let mut spans = Vec::new();
    if let View::Listing {
        body: PageBody::Ready(listing),
        ..
    } = view
    {
        let previous_style = if listing.previous_enabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled("[ Previous ]", previous_style));
        spans.push(Span::raw(format!(" Page {} ", listing.page)));
        spans.push(Span::styled("[ Next ]", Style::default().fg(Color::Cyan)));
        spans.push(Span::raw("   "));
    }

    let help_text = if app.focus() == Focus::Search {
        "Type to search | Enter: search | Esc: cancel"
    } else {
        "1/2/3: pages  /: search  \u{2190}\u{2191}\u{2193}\u{2192}/hjkl: move  Enter: open  n/p: page  Esc: back  m: menu  o: poster  r: reload  q: quit"
    };
    spans.push(Span::raw(help_text));

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
