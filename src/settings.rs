//! Game modes and menu settings
//!
//! Mode state chosen from the menu. Nothing here is persisted; it lives for
//! the session inside the engine.

use serde::{Deserialize, Serialize};

use crate::consts::{BALL_COLOR, BALL_SIZE, BALL_SPEED};

/// Who controls player 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Two humans share the keyboard (player 1 may use the mouse)
    #[default]
    PvP,
    /// Player 2 is the computer
    PvC,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::PvP => "pvp",
            GameMode::PvC => "pvc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pvp" => Some(GameMode::PvP),
            "pvc" => Some(GameMode::PvC),
            _ => None,
        }
    }
}

/// PvP movement variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PvpMode {
    /// Vertical movement only
    #[default]
    Default,
    /// Free movement within each player's half court
    Horizontal,
    /// Vertical movement plus paddle rotation that bends the return
    Tilting,
}

impl PvpMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PvpMode::Default => "defaultMode",
            PvpMode::Horizontal => "xyMode",
            PvpMode::Tilting => "tiltingMode",
        }
    }

    /// Accepts the menu's option values as well as plain names
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "defaultmode" | "default" | "classic" => Some(PvpMode::Default),
            "xymode" | "horizontal" => Some(PvpMode::Horizontal),
            "tiltingmode" | "tilting" => Some(PvpMode::Tilting),
            _ => None,
        }
    }

    /// Whether paddles are pinned to their margins on the x axis
    pub fn pins_x(&self) -> bool {
        match self {
            PvpMode::Default | PvpMode::Tilting => true,
            PvpMode::Horizontal => false,
        }
    }
}

/// How player 1 steers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlMode {
    #[default]
    Keyboard,
    Mouse,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Keyboard => "keyboardMode",
            ControlMode::Mouse => "mouseControl",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "keyboardmode" | "keyboard" => Some(ControlMode::Keyboard),
            "mousecontrol" | "mouse" => Some(ControlMode::Mouse),
            _ => None,
        }
    }
}

/// AI strength (PvC only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Complete mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ModeState {
    pub game_mode: GameMode,
    pub pvp_mode: PvpMode,
    pub control_mode: ControlMode,
    pub difficulty: Difficulty,
}

impl ModeState {
    /// Switch game mode. Entering PvC drops any PvP submode and mouse control
    /// for good; switching back to PvP does not restore them.
    pub fn set_game_mode(&mut self, mode: GameMode) {
        self.game_mode = mode;
        if mode == GameMode::PvC {
            self.pvp_mode = PvpMode::Default;
            self.control_mode = ControlMode::Keyboard;
        }
    }

    /// Set the PvP submode; under PvC only `Default` is accepted
    pub fn set_pvp_mode(&mut self, mode: PvpMode) {
        self.pvp_mode = match self.game_mode {
            GameMode::PvP => mode,
            GameMode::PvC => PvpMode::Default,
        };
    }

    /// Set the control mode; under PvC only `Keyboard` is accepted
    pub fn set_control_mode(&mut self, mode: ControlMode) {
        self.control_mode = match self.game_mode {
            GameMode::PvP => mode,
            GameMode::PvC => ControlMode::Keyboard,
        };
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Mouse steers player 1 only in PvP with mouse control selected
    pub fn mouse_drives_player1(&self) -> bool {
        self.game_mode == GameMode::PvP && self.control_mode == ControlMode::Mouse
    }
}

/// Ball customization from the menu sliders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallSettings {
    pub color: String,
    pub size: f32,
    pub speed: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            color: BALL_COLOR.to_string(),
            size: BALL_SIZE,
            speed: BALL_SPEED,
        }
    }
}

impl BallSettings {
    /// Read raw slider/picker values. Size and speed are whole numbers; any
    /// fraction is dropped.
    pub fn from_menu(color: &str, size: &str, speed: &str) -> Option<Self> {
        let whole = |s: &str| {
            s.trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(f32::trunc)
        };
        Some(Self {
            color: color.to_string(),
            size: whole(size)?,
            speed: whole(speed)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pvc_forces_default_and_keyboard() {
        let mut modes = ModeState::default();
        modes.set_pvp_mode(PvpMode::Tilting);
        modes.set_control_mode(ControlMode::Mouse);
        modes.set_game_mode(GameMode::PvC);
        assert_eq!(modes.pvp_mode, PvpMode::Default);
        assert_eq!(modes.control_mode, ControlMode::Keyboard);

        // Not restored on the way back
        modes.set_game_mode(GameMode::PvP);
        assert_eq!(modes.pvp_mode, PvpMode::Default);
        assert_eq!(modes.control_mode, ControlMode::Keyboard);
    }

    #[test]
    fn test_pvc_rejects_submode_changes() {
        let mut modes = ModeState::default();
        modes.set_game_mode(GameMode::PvC);
        modes.set_pvp_mode(PvpMode::Horizontal);
        modes.set_control_mode(ControlMode::Mouse);
        assert_eq!(modes.pvp_mode, PvpMode::Default);
        assert_eq!(modes.control_mode, ControlMode::Keyboard);
        assert!(!modes.mouse_drives_player1());
    }

    #[test]
    fn test_ball_settings_from_menu() {
        let settings = BallSettings::from_menu("#00ff00", "15", "4.7").unwrap();
        assert_eq!(settings.color, "#00ff00");
        assert_eq!(settings.size, 15.0);
        assert_eq!(settings.speed, 4.0);
        assert!(BallSettings::from_menu("#fff", "", "3").is_none());
        assert_eq!(BallSettings::default().speed, 2.0);
    }

    #[test]
    fn test_menu_values_parse() {
        assert_eq!(PvpMode::from_str("xyMode"), Some(PvpMode::Horizontal));
        assert_eq!(PvpMode::from_str("tiltingMode"), Some(PvpMode::Tilting));
        assert_eq!(ControlMode::from_str("mouseControl"), Some(ControlMode::Mouse));
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(GameMode::from_str("pvc"), Some(GameMode::PvC));
        assert_eq!(GameMode::from_str("coop"), None);
        for mode in [PvpMode::Default, PvpMode::Horizontal, PvpMode::Tilting] {
            assert_eq!(PvpMode::from_str(mode.as_str()), Some(mode));
        }
    }
}
