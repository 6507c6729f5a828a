//! Menu/event sink
//!
//! Fans a tick's results out to the menu, audio, and renderer adapters.

use crate::audio::{AudioSink, SoundEffect};
use crate::renderer::RenderSink;
use crate::settings::GameMode;
use crate::sim::{Engine, GameEvent, GameOverReport, TickResult};

/// Menu selector panels (page element ids; the difficulty id is spelled as
/// the page spells it)
pub const PVP_SELECTOR: &str = "pvpSelector";
pub const CONTROL_SELECTOR: &str = "controlSelector";
pub const DIFFICULTY_SELECTOR: &str = "diffcultySelector";

/// CSS `display` for each selector panel under `mode`: PvP shows the
/// submode and control pickers, PvC only the difficulty buttons
pub fn selector_displays(mode: GameMode) -> [(&'static str, &'static str); 3] {
    let (pvp, difficulty) = match mode {
        GameMode::PvP => ("block", "none"),
        GameMode::PvC => ("none", "block"),
    };
    [
        (PVP_SELECTOR, pvp),
        (CONTROL_SELECTOR, pvp),
        (DIFFICULTY_SELECTOR, difficulty),
    ]
}

/// Receives score updates and the final result
pub trait MenuSink {
    /// Called every tick with the current scores
    fn score_changed(&mut self, player1: u32, player2: u32);
    /// Called once when a match ends
    fn game_over(&mut self, report: &GameOverReport);
}

/// Route one tick's events to the adapters and draw the frame
pub fn dispatch(
    engine: &Engine,
    result: &TickResult,
    menu: &mut dyn MenuSink,
    audio: &mut dyn AudioSink,
    render: &mut dyn RenderSink,
) {
    play_sounds(&result.events, audio);
    menu.score_changed(result.scores.player1, result.scores.player2);
    if let Some(report) = result.game_over() {
        menu.game_over(&report);
    }
    render.draw(&engine.snapshot());
}

/// Play the sound for each event that has one
pub fn play_sounds(events: &[GameEvent], audio: &mut dyn AudioSink) {
    for effect in events.iter().filter_map(SoundEffect::for_event) {
        audio.play(effect);
    }
}

/// Banner text for the game-over screen
pub fn winner_banner(report: &GameOverReport) -> String {
    format!("{} Wins!", report.winner)
}

/// Menu sink that remembers the latest state (headless runs and tests)
#[derive(Debug, Default, Clone)]
pub struct ScoreLog {
    pub latest: (u32, u32),
    pub updates: usize,
    pub result: Option<GameOverReport>,
}

impl MenuSink for ScoreLog {
    fn score_changed(&mut self, player1: u32, player2: u32) {
        if (player1, player2) != self.latest {
            log::debug!("Score {player1}-{player2}");
        }
        self.latest = (player1, player2);
        self.updates += 1;
    }

    fn game_over(&mut self, report: &GameOverReport) {
        log::info!("{}", winner_banner(report));
        self.result = Some(*report);
    }
}
