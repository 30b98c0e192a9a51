use crate::app::App;
use crate::audio::{AudioCmd, AudioPlayer, LoopMode};
use crate::config;

/// Seed the app and the engine thread with the configured playback defaults.
pub fn apply_playback_defaults(
    app: &mut App,
    audio_player: &AudioPlayer,
    settings: &config::Settings,
) {
    app.loop_mode = match settings.playback.loop_mode {
        config::LoopModeSetting::NoLoop => LoopMode::NoLoop,
        config::LoopModeSetting::LoopAll => LoopMode::LoopAll,
        config::LoopModeSetting::LoopOne => LoopMode::LoopOne,
    };
    let volume = app.set_volume(settings.playback.volume);

    let _ = audio_player.send(AudioCmd::SetLoopMode(app.loop_mode));
    let _ = audio_player.send(AudioCmd::SetVolume(volume));
}
