//! Sound triggers and the Web Audio backend
//!
//! The simulation only names sounds. Each one is a single oscillator beep;
//! the tone table lives here. Without a working audio context everything
//! degrades to silence.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top/bottom wall
    WallHit,
    /// A point was scored
    Score,
    /// Match started
    GameStart,
    /// Match finished
    GameOver,
}

impl SoundEffect {
    /// Sound for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::GameStarted => Some(SoundEffect::GameStart),
            GameEvent::WallHit => Some(SoundEffect::WallHit),
            GameEvent::PaddleHit { .. } => Some(SoundEffect::PaddleHit),
            GameEvent::Score { .. } => Some(SoundEffect::Score),
            GameEvent::GameOver(_) => Some(SoundEffect::GameOver),
            GameEvent::Resumed | GameEvent::ShakeEnded => None,
        }
    }

    /// Tone parameters for this effect
    pub fn beep(&self) -> Beep {
        match self {
            SoundEffect::PaddleHit => Beep::new(300.0, 0.1, Waveform::Sawtooth),
            SoundEffect::WallHit => Beep::new(200.0, 0.1, Waveform::Sine),
            SoundEffect::Score => Beep::new(500.0, 0.3, Waveform::Square),
            SoundEffect::GameStart => Beep::new(400.0, 0.5, Waveform::Sine),
            SoundEffect::GameOver => Beep::new(150.0, 1.0, Waveform::Sine),
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// A constant-frequency tone with an exponential fade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beep {
    pub frequency: f32,
    /// Seconds
    pub duration: f64,
    pub waveform: Waveform,
}

impl Beep {
    pub const fn new(frequency: f32, duration: f64, waveform: Waveform) -> Self {
        Self {
            frequency,
            duration,
            waveform,
        }
    }
}

/// Starting gain of every beep
pub const BEEP_GAIN: f32 = 0.3;
/// Gain the fade ramps down to
pub const BEEP_FLOOR: f32 = 0.01;

/// Anything that can play the game's sounds
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Audio sink that plays nothing (native builds, no backend, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct MutedAudio;

impl AudioSink for MutedAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Records what would have been played
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    pub played: Vec<SoundEffect>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, BEEP_FLOOR, BEEP_GAIN, Beep, SoundEffect, Waveform};

    /// Web Audio beeps
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context or without Web Audio support
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_beep(ctx: &AudioContext, beep: Beep) {
            let osc_type = match beep.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            };
            let Some((osc, gain)) = Self::create_osc(ctx, beep.frequency, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(BEEP_GAIN, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(BEEP_FLOOR, t + beep.duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + beep.duration).ok();
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            Self::play_beep(ctx, effect.beep());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameOverReport, Player, Scoreboard, Winner};

    #[test]
    fn test_event_sounds() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PaddleHit {
                player: Player::Player2
            }),
            Some(SoundEffect::PaddleHit)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Score {
                scorer: Player::Player1,
                scores: Scoreboard::default()
            }),
            Some(SoundEffect::Score)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver(GameOverReport {
                winner: Winner::Player2,
                player1_score: 3,
                player2_score: 11,
            })),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::Resumed), None);
    }

    #[test]
    fn test_beep_table() {
        let beep = SoundEffect::GameOver.beep();
        assert_eq!(beep.frequency, 150.0);
        assert_eq!(beep.duration, 1.0);
        assert_eq!(SoundEffect::PaddleHit.beep().waveform, Waveform::Sawtooth);
    }

    #[test]
    fn test_muted_sink_accepts_everything() {
        let mut sink = MutedAudio;
        sink.play(SoundEffect::Score);
        sink.play(SoundEffect::GameOver);
    }
}
