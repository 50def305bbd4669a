use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::catalog::CatalogStore;
use crate::config;
use crate::playback::{Player, SessionEvent};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self { pending_gg: false }
    }
}

/// Main terminal event loop: drains playback events, draws the UI and
/// handles input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    catalog: &dyn CatalogStore,
    player: &Player,
    events: &Receiver<SessionEvent>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Fold in everything the playback thread reported since the last
        // frame. Auto-advance rides on the end-of-track report: the ended
        // id tells us where in the playlist to continue from.
        while let Ok(ev) = events.try_recv() {
            if let SessionEvent::TrackEnded { id } = &ev {
                if settings.playback.autoplay_next {
                    if let Some(next) = app.playlist.next_after(id).cloned() {
                        player.play(next);
                    }
                }
            }
            app.apply_event(ev);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, catalog, player, state)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Switch categories with wraparound, remounting the playlist. Playback is
/// stopped first so the old category's track never outlives its view.
fn switch_category(app: &mut App, catalog: &dyn CatalogStore, step: i64, player: &Player) {
    let count = app.categories.len();
    if count == 0 {
        return;
    }

    player.stop();
    let idx = (app.category_idx as i64 + step).rem_euclid(count as i64) as usize;
    let category = app.categories[idx].clone();
    let entries = catalog.entries_in(&category);
    app.mount_category(idx, &entries);
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    catalog: &dyn CatalogStore,
    player: &Player,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return Ok(true);
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.follow_playback_off();
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.follow_playback_off();
            app.select_last();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.follow_playback_off();
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.follow_playback_off();
            app.prev();
        }
        KeyCode::Tab => {
            state.pending_gg = false;
            switch_category(app, catalog, 1, player);
        }
        KeyCode::BackTab => {
            state.pending_gg = false;
            switch_category(app, catalog, -1, player);
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            if let Some(track) = app.selected_track().cloned() {
                app.follow_playback_on();
                player.play(track);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            player.toggle_pause();
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            // Next relative to the playing track, else play the selection.
            let next = match app.now_playing_id() {
                Some(id) => app.playlist.next_after(id).cloned(),
                None => app.selected_track().cloned(),
            };
            if let Some(track) = next {
                player.play(track);
            }
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            let prev = match app.now_playing_id() {
                Some(id) => app.playlist.previous_before(id).cloned(),
                None => app.selected_track().cloned(),
            };
            if let Some(track) = prev {
                player.play(track);
            }
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            player.seek_by(secs);
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            player.seek_by(-secs);
        }
        KeyCode::Char('x') => {
            state.pending_gg = false;
            player.stop();
        }
        KeyCode::Char('r') => {
            state.pending_gg = false;
            // Re-query the current category from the catalog.
            if let Some(category) = app.current_category().map(str::to_string) {
                let entries = catalog.entries_in(&category);
                let idx = app.category_idx;
                app.mount_category(idx, &entries);
            }
        }
        KeyCode::Esc => {
            state.pending_gg = false;
            app.clear_notice();
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    Ok(false)
}
