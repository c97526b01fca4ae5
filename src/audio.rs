//! Sound effects as a capability
//!
//! The simulation only emits [`GameEvent`]s. Whoever presents the game maps
//! them to sounds and plays them through an [`AudioSink`]; every sink method
//! has a silent default so a missing backend is never an error.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Pistol shot
    Shot,
    /// Magazine empty, reload begins
    Reload,
    /// Player took damage
    Hurt,
    /// Enemy destroyed by a bullet
    EnemyDeath,
    /// Next wave incoming
    WaveClear,
    /// All waves cleared
    Win,
    /// Player out of lives
    GameOver,
}

impl SoundEffect {
    /// Sound cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired { .. } => Some(Self::Shot),
            GameEvent::ReloadStarted => Some(Self::Reload),
            GameEvent::PlayerHurt { .. } => Some(Self::Hurt),
            GameEvent::EnemyKilled { .. } => Some(Self::EnemyDeath),
            GameEvent::WaveAdvanced { .. } => Some(Self::WaveClear),
            GameEvent::SessionWon => Some(Self::Win),
            GameEvent::SessionLost => Some(Self::GameOver),
            GameEvent::ReloadFinished | GameEvent::EnemyContact { .. } => None,
        }
    }

    /// Mix level (0.0 - 1.0)
    pub fn volume(self) -> f32 {
        match self {
            Self::Shot => 0.1,
            Self::Reload | Self::Hurt => 0.5,
            Self::EnemyDeath | Self::WaveClear => 0.3,
            Self::Win | Self::GameOver => 0.7,
        }
    }
}

/// Something that can play sounds
pub trait AudioSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}

    /// Play the cue for every event that has one
    fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect, effect.volume());
        }
    }
}

/// Plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {}

/// Logs every cue instead of playing it (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio {
    played: usize,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cues played so far
    pub fn played(&self) -> usize {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::debug!("sound {:?} at {:.2}", effect, volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<SoundEffect>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, _volume: f32) {
            self.0.push(effect);
        }
    }

    #[test]
    fn test_events_without_cue_are_skipped() {
        let mut rec = Recorder::default();
        rec.play_events(&[
            GameEvent::ReloadStarted,
            GameEvent::ReloadFinished,
            GameEvent::EnemyContact { id: 3 },
            GameEvent::SessionLost,
        ]);
        assert_eq!(rec.0, vec![SoundEffect::Reload, SoundEffect::GameOver]);
    }

    #[test]
    fn test_silent_sink_is_noop() {
        let mut sink = SilentAudio;
        sink.play_events(&[GameEvent::SessionWon]);
    }

    #[test]
    fn test_log_audio_counts() {
        let mut sink = LogAudio::new();
        sink.play_events(&[GameEvent::PlayerHurt { life: 2 }, GameEvent::WaveAdvanced { wave: 2 }]);
        assert_eq!(sink.played(), 2);
    }
}
