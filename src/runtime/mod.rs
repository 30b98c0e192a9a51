use std::env;
use std::path::Path;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::library;
use crate::mpris::ControlCmd;
use crate::position::PositionStore;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    // Saved offsets from the previous session. Loading consumes the file;
    // until shutdown the in-memory store is the only copy.
    let mut store = PositionStore::load(settings.storage.position_file.clone());

    // Optional starting path; the playlist can also be filled later from the
    // add prompt.
    let tracks = match env::args().nth(1) {
        Some(arg) => library::expand(Path::new(&arg), &settings.library),
        None => Vec::new(),
    };

    let audio_player = AudioPlayer::new(tracks.clone(), settings.playback.volume);
    let mut app = App::new(tracks);
    app.set_playback_handle(audio_player.playback_handle());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    mpris_sync::update_mpris(&mpris, &app);

    startup::apply_playback_defaults(&mut app, &audio_player, &settings);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&app);

        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &audio_player,
            &mpris,
            &control_tx,
            &control_rx,
            &mut store,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // The quit paths already recorded the in-flight track's offset; all that
    // remains is writing the store back out.
    if let Err(e) = store.save() {
        eprintln!(
            "reprise: failed to write {}: {e}",
            store.file_path().display()
        );
    }

    run_result
}
