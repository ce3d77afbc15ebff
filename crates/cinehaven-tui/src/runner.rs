//! Terminal setup and the browser event loop.

use std::io;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use cinehaven_api::tmdb::TmdbApi;
use cinehaven_store::Store;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::app::{App, Focus};
use crate::navbar::links;
use crate::route::Route;
use crate::ui;

/// Runs the interactive browser starting at `start`.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<A>(store: Store<A>, start: Route) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut terminal = or_restore(enter_terminal(), restore_terminal)?;

    let mut app = App::new(store, start);
    app.sync();

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Cleanup (always attempt even if event loop failed)
    restore_terminal()?;

    result
}

/// Switches to the alternate screen and builds the terminal.
fn enter_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")
}

/// Runs `restore` when `setup` failed. The setup error is returned either way.
fn or_restore<T>(setup: Result<T>, restore: impl FnOnce() -> Result<()>) -> Result<T> {
    setup.inspect_err(|_| {
        if let Err(e) = restore() {
            warn!(error = %e, "failed to restore terminal");
        }
    })
}

/// Leaves raw mode and the alternate screen.
fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    Ok(())
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<A>,
) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
{
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    thread::spawn(move || read_terminal_events(&input_tx));

    loop {
        let size = terminal.size().context("failed to read terminal size")?;
        app.set_viewport_width(size.width);
        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("failed to draw TUI")?;

        if app.should_quit() {
            return Ok(());
        }

        tokio::select! {
            input = input_rx.recv() => match input {
                Some(Event::Key(key)) => handle_key(app, key),
                Some(_) => {}
                None => return Ok(()),
            },
            _ = app.next_event() => {}
        }
    }
}

/// Forwards key presses and resizes until the receiver is dropped.
fn read_terminal_events(tx: &mpsc::UnboundedSender<Event>) {
    while !tx.is_closed() {
        match event::poll(Duration::from_millis(100)) {
            Ok(false) => {}
            Ok(true) => match event::read() {
                Ok(
                    ev @ (Event::Key(KeyEvent {
                        kind: KeyEventKind::Press,
                        ..
                    })
                    | Event::Resize(..)),
                ) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "failed to read terminal event");
                    break;
                }
            },
            Err(e) => {
                warn!(error = %e, "failed to poll terminal events");
                break;
            }
        }
    }
    debug!("terminal input thread stopped");
}

/// Dispatches a key press to the focused widget.
pub fn handle_key<A>(app: &mut App<A>, key: KeyEvent)
where
    A: TmdbApi + Send + Sync + 'static,
{
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }
    match app.focus() {
        Focus::Search => handle_search_input(app, key.code),
        Focus::Browse => handle_browse_input(app, key.code),
    }
}

/// Handles key input while the search box is focused.
fn handle_search_input<A>(app: &mut App<A>, key: KeyCode)
where
    A: TmdbApi + Send + Sync + 'static,
{
    match key {
        KeyCode::Esc => app.set_focus(Focus::Browse),
        KeyCode::Enter => app.submit_search(),
        KeyCode::Backspace => app.navbar_mut().pop(),
        KeyCode::Char(c) => app.navbar_mut().push(c),
        _ => {}
    }
}

/// Handles key input while browsing pages.
fn handle_browse_input<A>(app: &mut App<A>, key: KeyCode)
where
    A: TmdbApi + Send + Sync + 'static,
{
    match key {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char(c @ ('1' | '2' | '3')) => {
            if let Some(link) = links().into_iter().find(|l| l.key == c) {
                app.navigate(link.route);
            }
        }
        KeyCode::Char('/') => app.set_focus(Focus::Search),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Esc | KeyCode::Backspace => {
            app.back();
        }
        KeyCode::Left | KeyCode::Char('h') => app.move_left(),
        KeyCode::Right | KeyCode::Char('l') => app.move_right(),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Char('n') => app.next_page(),
        KeyCode::Char('p') => app.previous_page(),
        KeyCode::Char('m') => app.navbar_mut().toggle_menu(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('o') => {
            if let Some(url) = app.selected_poster_url()
                && let Err(e) = open::that(&url)
            {
                warn!(error = %e, %url, "failed to open poster in browser");
            }
        }
        _ => {}
    }
}
