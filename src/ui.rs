//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Tabs, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::App;
use crate::config::{ControlsSettings, TimeField, UiSettings};
use crate::playback::TransportState;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("tab".to_string(), "next category".to_string());
    map.insert("enter".to_string(), "play selected".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next track".to_string());
    // H/L is filled dynamically from config.
    map.insert("x".to_string(), "stop".to_string());
    map.insert("r".to_string(), "reload category".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "h/l", "H/L", "enter", "space/p", "x", "gg/G", "tab", "r", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the now-playing time text (elapsed/total/remaining) per `UiSettings`.
fn now_playing_time_text(
    elapsed: Duration,
    total: Option<Duration>,
    ui: &UiSettings,
) -> Option<String> {
    if ui.now_playing_time_fields.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mmss(elapsed)),
            TimeField::Total => {
                if let Some(t) = total {
                    parts.push(format_mmss(t));
                }
            }
            TimeField::Remaining => {
                if let Some(t) = total {
                    let rem = t.saturating_sub(elapsed);
                    parts.push(format!("-{}", format_mmss(rem)));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

/// Fraction of the track played, for the progress gauge. `None` when the
/// duration is unknown (the gauge is hidden rather than guessed).
fn progress_ratio(elapsed: Duration, total: Option<Duration>) -> Option<f64> {
    let total = total.filter(|t| !t.is_zero())?;
    Some((elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0))
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" adagio ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Category tabs
    let tabs = Tabs::new(app.categories.iter().map(String::as_str))
        .select(app.category_idx)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::default().borders(Borders::ALL).title(" categories "));
    frame.render_widget(tabs, chunks[1]);

    // Track list: only build ListItems for the visible window, keeping the
    // selected item centered when possible.
    {
        let tracks = app.playlist.tracks();
        let total = tracks.len();
        let list_height = chunks[2].height as usize;
        let sel_pos = app.selected.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let playing_id = app.now_playing_id();
        let visible_items: Vec<ListItem> = tracks[start..end]
            .iter()
            .map(|t| {
                if playing_id == Some(t.id.as_str()) {
                    ListItem::new(format!("♪ {}", t.display))
                        .style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    ListItem::new(format!("  {}", t.display))
                }
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Now-playing box: one text line plus a progress gauge.
    {
        let block = Block::bordered()
            .padding(Padding {
                left: 1,
                right: 1,
                top: 0,
                bottom: 0,
            })
            .title(" now playing ");
        let inner = block.inner(chunks[3]);
        frame.render_widget(block, chunks[3]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let line = match &app.now_playing {
            Some(np) => {
                let display = app
                    .playlist
                    .position_of(&np.track_id)
                    .and_then(|i| app.playlist.get(i))
                    .map(|t| t.display.clone())
                    .unwrap_or_else(|| np.track_id.clone());
                let state = match app.playback {
                    TransportState::Playing => "Playing",
                    TransportState::Paused | TransportState::Loaded => "Paused",
                    TransportState::Idle => "Stopped",
                };
                match now_playing_time_text(np.position, np.duration, ui_settings) {
                    Some(time) => format!("{state}: {display} [{time}]"),
                    None => format!("{state}: {display}"),
                }
            }
            None => "Stopped".to_string(),
        };
        frame.render_widget(Paragraph::new(line), rows[0]);

        if let Some(np) = &app.now_playing {
            if let Some(ratio) = progress_ratio(np.position, np.duration) {
                let gauge = Gauge::default()
                    .ratio(ratio)
                    .label(format_mmss(np.position));
                frame.render_widget(gauge, rows[1]);
            }
        }

        if let Some(notice) = &app.notice {
            frame.render_widget(
                Paragraph::new(notice.as_str())
                    .style(Style::default().add_modifier(Modifier::ITALIC)),
                rows[2],
            );
        }
    }

    let footer_text = controls_text(controls_settings.scrub_seconds);
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_text_follows_field_order_and_separator() {
        let mut ui = UiSettings::default();
        ui.now_playing_time_separator = " | ".to_string();
        let text = now_playing_time_text(
            Duration::from_secs(65),
            Some(Duration::from_secs(180)),
            &ui,
        );
        assert_eq!(text.as_deref(), Some("01:05 | 03:00 | -01:55"));
    }

    #[test]
    fn time_text_omits_total_and_remaining_when_duration_unknown() {
        let ui = UiSettings::default();
        let text = now_playing_time_text(Duration::from_secs(65), None, &ui);
        assert_eq!(text.as_deref(), Some("01:05"));
    }

    #[test]
    fn progress_ratio_clamps_and_hides_unknown() {
        assert!(progress_ratio(Duration::from_secs(5), None).is_none());
        assert!(progress_ratio(Duration::from_secs(5), Some(Duration::ZERO)).is_none());
        let r = progress_ratio(Duration::from_secs(90), Some(Duration::from_secs(60))).unwrap();
        assert_eq!(r, 1.0);
    }
}
