//! Audio cue routing
//!
//! The simulation only raises events; this module turns them into sound
//! effects, applies the volume settings and hands them to whatever backend
//! the presentation layer provides. A failing or missing backend is the
//! backend's problem: cues are fire-and-forget.

use crate::session::SessionEvent;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Projectile fired
    Shoot,
    /// Enemy body contact
    PlayerDamaged,
    /// Enemy destroyed
    EnemyKilled,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shoot { .. } => Some(SoundEffect::Shoot),
            GameEvent::PlayerDamaged { .. } => Some(SoundEffect::PlayerDamaged),
            GameEvent::EnemyKilled { .. } => Some(SoundEffect::EnemyKilled),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::EnemyHit { .. } => None,
        }
    }
}

/// Backend that actually produces sound
pub trait SoundSink {
    /// Play a one-shot effect at the given volume (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Start the looping background track
    fn start_music(&mut self, volume: f32);
    fn stop_music(&mut self);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} @ {:.2}", effect, volume);
    }

    fn start_music(&mut self, volume: f32) {
        log::debug!("music start @ {:.2}", volume);
    }

    fn stop_music(&mut self) {
        log::debug!("music stop");
    }
}

/// Audio manager for the game
pub struct AudioManager<S: SoundSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl<S: SoundSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
        }
    }

    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        let mut audio = Self::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.music_volume = settings.music_volume.clamp(0.0, 1.0);
        audio.muted = settings.muted;
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted && self.music_playing {
            self.sink.stop_music();
            self.music_playing = false;
        }
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Route a simulation event to its cue
    pub fn on_game_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }

    /// Background music follows the session lifecycle
    pub fn on_session_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::GameStarted { .. } => self.start_music(),
            SessionEvent::Terminated => self.stop_music(),
        }
    }

    pub fn start_music(&mut self) {
        let vol = if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        };
        if self.music_playing || vol <= 0.0 {
            return;
        }
        self.sink.start_music(vol);
        self.music_playing = true;
    }

    pub fn stop_music(&mut self) {
        if self.music_playing {
            self.sink.stop_music();
            self.music_playing = false;
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
