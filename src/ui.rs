//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Gauge, Padding, Paragraph, Row, Table, Wrap},
};
use std::time::Duration;

use crate::app::{App, PlaybackState};
use crate::audio::LoopMode;
use crate::config::{ControlsSettings, UiSettings};

/// Render the controls help text, incorporating the seek step.
fn controls_text(seek_step_seconds: u64) -> String {
    [
        "[j/k] select".to_string(),
        "[enter] play row".to_string(),
        "[space] play/pause".to_string(),
        "[x] stop".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[s] seek ({seek_step_seconds}s steps)"),
        "[+/-] volume".to_string(),
        "[m] mute".to_string(),
        "[a] add".to_string(),
        "[r] loop mode".to_string(),
        "[K] info".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
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
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Snapshot playback info once per frame.
    let (position, duration, engine_index, last_error) = match app.playback_handle.as_ref() {
        Some(h) => match h.lock() {
            Ok(info) => (
                info.position,
                info.duration,
                info.index,
                info.last_error.clone(),
            ),
            Err(_) => (Duration::ZERO, None, None, None),
        },
        None => (Duration::ZERO, None, None, None),
    };

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" reprise ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box: current track label, transport state, volume, loop mode.
    let status = {
        let mut parts: Vec<String> = Vec::new();

        match app.current_track() {
            Some(track) => parts.push(format!("Track: {}", track.display)),
            None => parts.push("Track: -".to_string()),
        }

        let state = match app.playback {
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
            PlaybackState::Stopped => "Stopped",
        };
        parts.push(state.to_string());

        if app.is_muted() {
            parts.push("Vol: muted".to_string());
        } else {
            parts.push(format!("Vol: {}%", app.volume));
        }

        let loop_text = match app.loop_mode {
            LoopMode::NoLoop => "No-loop",
            LoopMode::LoopAll => "Loop-around",
            LoopMode::LoopOne => "Repeat-one",
        };
        parts.push(loop_text.to_string());

        if app.add_mode {
            parts.push(format!("ADD: {}_", app.add_input));
        }

        if let Some(err) = last_error {
            parts.push(format!("engine: {err}"));
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Track table. The path column of the model is not rendered; it shows
    // in the info popup instead.
    {
        let rows: Vec<Row> = app
            .tracks
            .iter()
            .enumerate()
            .map(|(i, track)| {
                let marker = if engine_index == Some(i) { "♪ " } else { "  " };
                let row = Row::new(vec![Cell::from(format!("{marker}{}", track.display))]);
                if i == app.cursor {
                    row.style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    row
                }
            })
            .collect();

        let table = Table::new(rows, [Constraint::Percentage(100)])
            .header(Row::new(vec![Cell::from("File")]))
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = ratatui::widgets::TableState::default();
        if app.has_tracks() {
            state.select(Some(app.selected.min(app.tracks.len() - 1)));
        }
        frame.render_stateful_widget(table, chunks[2], &mut state);
    }

    // Seek bar: mirrors engine position/duration, except while the user is
    // scrubbing, when it shows the pending target instead.
    {
        let (shown, title) = match app.seek_target {
            Some(target) => (target, " seek to "),
            None => (position, " position "),
        };

        let (ratio, label) = match duration {
            Some(total) if !total.is_zero() => {
                let r = shown.as_secs_f64() / total.as_secs_f64();
                (
                    r.clamp(0.0, 1.0),
                    format!("{} / {}", format_mmss(shown), format_mmss(total)),
                )
            }
            _ => (0.0, "--:-- / --:--".to_string()),
        };

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .ratio(ratio)
            .label(label);
        frame.render_widget(gauge, chunks[3]);
    }

    // Overlay info popup (keeps the table visible under it). This is where
    // the track's full path lives.
    if app.metadata_window {
        let list_area = chunks[2];
        let popup_area = centered_rect_sized(72, 9, list_area);
        frame.render_widget(Clear, popup_area);

        let track = app.tracks.get(app.selected);
        let meta = if let Some(track) = track {
            let dur = track
                .duration
                .map(format_mmss)
                .unwrap_or_else(|| "-".to_string());
            format!(
                "Title: {}\nArtist: {}\nAlbum: {}\nDuration: {}\nPath: {}",
                track.title,
                track.artist.as_deref().unwrap_or("-"),
                track.album.as_deref().unwrap_or("-"),
                dur,
                track.path.display()
            )
        } else {
            "No track selected".to_string()
        };
        let meta_paragraph = Paragraph::new(meta)
            .block(
                Block::default()
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    })
                    .borders(Borders::ALL)
                    .title(" info (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(meta_paragraph, popup_area);
    }

    let footer_text = controls_text(controls_settings.seek_step_seconds);
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
