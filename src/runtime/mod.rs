use std::env;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::catalog::CatalogStore;
use crate::playback::Player;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let source = env::args().nth(1).unwrap_or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(|s| s.to_string()))
            .unwrap_or_else(|| "Music".to_string())
    });

    let catalog = startup::open_catalog(&source, &settings)?;
    if catalog.is_empty() {
        eprintln!("adagio: no tracks found in {source}");
    }

    let mut app = App::new(catalog.categories());
    startup::apply_startup_defaults(&mut app, &catalog, &settings);

    let player = Player::new(Duration::from_millis(settings.playback.progress_interval_ms));
    let events = player
        .take_events()
        .ok_or("playback event channel already taken")?;

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &catalog,
            &player,
            &events,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Stop playback and join the playback thread before exiting.
    player.shutdown();

    run_result
}
