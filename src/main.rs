mod app;
mod catalog;
mod config;
mod playback;
mod playlist;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging is opt-in via RUST_LOG; the TUI owns the terminal otherwise.
    env_logger::init();

    runtime::run()
}
