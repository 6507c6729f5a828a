//! Per-frame simulation
//!
//! `Engine` owns every piece of game state. A driver calls [`Engine::tick`]
//! once per animation frame with the current input snapshot and frame time;
//! the engine reports what happened through the returned [`TickResult`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ai;
use super::collision::{ball_paddle_overlap, paddle_bounce, wall_bounce};
use super::input::{InputSnapshot, apply_keyboard, apply_pointer};
use super::state::{
    Ball, FrameSnapshot, GameEvent, GameOverReport, GamePhase, Paddle, Player, Scoreboard,
    TickResult,
};
use super::timer::{TimerHandle, TimerKind, Timers};
use crate::config::GameConfig;
use crate::settings::{BallSettings, ControlMode, Difficulty, GameMode, ModeState, PvpMode};

/// The game simulation
#[derive(Debug, Clone)]
pub struct Engine {
    config: GameConfig,
    modes: ModeState,
    phase: GamePhase,
    scores: Scoreboard,
    ball: Ball,
    /// Index 0 is player 1 (left), index 1 is player 2 (right)
    paddles: [Paddle; 2],
    timers: Timers,
    /// Serve-again timer while paused after a point
    resume: Option<TimerHandle>,
    shaking: bool,
    rng: Pcg32,
}

impl Engine {
    /// Create an idle engine. `seed` drives serve angles and AI noise.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let ball = Ball::new(&config);
        let paddles = [
            Paddle::new(Player::Player1, &config),
            Paddle::new(Player::Player2, &config),
        ];
        Self {
            config,
            modes: ModeState::default(),
            phase: GamePhase::Idle,
            scores: Scoreboard::default(),
            ball,
            paddles,
            timers: Timers::new(),
            resume: None,
            shaking: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn modes(&self) -> ModeState {
        self.modes
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Copy of the current scores
    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        &self.paddles[Self::slot(player)]
    }

    pub fn is_shaking(&self) -> bool {
        self.shaking
    }

    /// A post-score resume is scheduled and still live
    pub fn resume_pending(&self) -> bool {
        self.resume.is_some_and(|handle| self.timers.is_pending(handle))
    }

    /// Everything a renderer needs, detached from the engine
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            ball: self.ball.clone(),
            paddles: self.paddles.clone(),
            scores: self.scores,
            phase: self.phase,
            shaking: self.shaking,
            canvas_size: Vec2::new(self.config.canvas_width, self.config.canvas_height),
        }
    }

    fn slot(player: Player) -> usize {
        match player {
            Player::Player1 => 0,
            Player::Player2 => 1,
        }
    }

    // === Lifecycle ===

    /// Restore construction defaults: entities, scores, and mode selection.
    /// Cancels any pending resume.
    pub fn reset_game(&mut self) {
        self.timers.cancel_all();
        self.resume = None;
        self.modes = ModeState::default();
        self.phase = GamePhase::Idle;
        self.scores = Scoreboard::default();
        self.shaking = false;
        self.ball = Ball::new(&self.config);
        self.paddles = [
            Paddle::new(Player::Player1, &self.config),
            Paddle::new(Player::Player2, &self.config),
        ];
    }

    /// Begin a match with the current modes: zero the scores and serve.
    /// Any pause left over from a previous match is cancelled.
    pub fn start_game(&mut self) -> Vec<GameEvent> {
        self.timers.cancel_all();
        self.resume = None;
        self.shaking = false;
        self.scores = Scoreboard::default();
        self.reset_ball();
        self.phase = GamePhase::Running;
        log::info!(
            "Game started: {} / {} / {} / {}",
            self.modes.game_mode.as_str(),
            self.modes.pvp_mode.as_str(),
            self.modes.control_mode.as_str(),
            self.modes.difficulty.as_str()
        );
        vec![GameEvent::GameStarted]
    }

    /// Leave the current match (Escape). Scores are kept for display, but no
    /// pending resume can revive the game.
    pub fn exit_to_menu(&mut self) {
        if matches!(self.phase, GamePhase::Running | GamePhase::Paused) {
            log::info!("Game exited to menu");
        }
        self.timers.cancel_all();
        self.resume = None;
        self.shaking = false;
        self.phase = GamePhase::Idle;
    }

    /// Serve from the center at a random angle within ±45° toward a random
    /// side, and send both paddles home with no tilt.
    pub fn reset_ball(&mut self) {
        use std::f32::consts::FRAC_PI_4;

        let angle = self.rng.random_range(-FRAC_PI_4..FRAC_PI_4);
        let direction = if self.rng.random::<f32>() > 0.5 { 1.0 } else { -1.0 };
        let speed = self.config.ball_speed;

        self.ball.pos = Vec2::new(self.config.canvas_width / 2.0, self.config.canvas_height / 2.0);
        self.ball.vel = Vec2::new(direction * speed * angle.cos(), speed * angle.sin());

        for paddle in &mut self.paddles {
            let home = Paddle::new(paddle.owner, &self.config);
            paddle.pos = home.pos;
            paddle.tilt = 0.0;
        }
    }

    // === Mode/settings controller ===

    pub fn set_game_mode(&mut self, mode: GameMode) {
        self.modes.set_game_mode(mode);
        log::debug!("Game mode: {}", mode.as_str());
    }

    pub fn set_pvp_mode(&mut self, mode: PvpMode) {
        self.modes.set_pvp_mode(mode);
        if self.modes.pvp_mode != mode {
            log::warn!("{} ignored in PvC", mode.as_str());
        }
    }

    pub fn set_control_mode(&mut self, mode: ControlMode) {
        self.modes.set_control_mode(mode);
        if self.modes.control_mode != mode {
            log::warn!("{} ignored in PvC", mode.as_str());
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.modes.set_difficulty(difficulty);
        log::debug!("Difficulty: {}", difficulty.as_str());
    }

    /// Ball color, size, and serve speed currently in effect
    pub fn ball_settings(&self) -> BallSettings {
        BallSettings {
            color: self.config.ball_color.clone(),
            size: self.config.ball_size,
            speed: self.config.ball_speed,
        }
    }

    /// Apply menu ball settings. The new speed also becomes the serve speed;
    /// the ball in flight keeps its direction at the new speed (a stationary
    /// ball stays stationary). A non-finite or negative speed, or a size that
    /// isn't positive, is rejected and nothing changes.
    pub fn update_settings(&mut self, color: &str, size: f32, speed: f32) {
        if !(speed.is_finite() && speed >= 0.0 && size.is_finite() && size > 0.0) {
            log::warn!("Ball settings ignored: size {size}, speed {speed}");
            return;
        }
        self.ball.color = color.to_string();
        self.ball.size = size;
        self.config.ball_color = color.to_string();
        self.config.ball_size = size;
        self.config.ball_speed = speed;
        self.ball.set_speed(speed);
    }

    /// Keep both paddles inside their allowed region for the current submode
    pub fn constrain_paddles(&mut self) {
        let width = self.config.canvas_width;
        let height = self.config.canvas_height;
        let half = width / 2.0;

        if self.modes.pvp_mode.pins_x() {
            self.paddles[0].pos.x = self.config.left_paddle_x();
            self.paddles[1].pos.x = self.config.right_paddle_x();
        } else {
            let [p1, p2] = &mut self.paddles;
            p1.pos.x = p1.pos.x.clamp(0.0, half - p1.width);
            p2.pos.x = p2.pos.x.clamp(half, width - p2.width);
        }

        for paddle in &mut self.paddles {
            paddle.clamp_y(height);
        }
    }

    // === Simulation ===

    /// Advance one frame. `dt` is the frame time in seconds; it only drives
    /// the pause/shake timers, movement is per tick.
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32) -> TickResult {
        let mut events = Vec::new();

        for kind in self.timers.advance(dt) {
            self.on_timer(kind, &mut events);
        }

        if self.phase == GamePhase::Running {
            self.step(input, &mut events);
        }

        TickResult {
            events,
            phase: self.phase,
            scores: self.scores,
        }
    }

    fn on_timer(&mut self, kind: TimerKind, events: &mut Vec<GameEvent>) {
        match kind {
            TimerKind::EndShake => {
                self.shaking = false;
                events.push(GameEvent::ShakeEnded);
            }
            TimerKind::ResumeAfterScore => {
                self.resume = None;
                if self.phase != GamePhase::Paused {
                    return;
                }
                self.reset_ball();
                self.phase = GamePhase::Running;
                log::info!(
                    "Resuming at {}-{}",
                    self.scores.player1,
                    self.scores.player2
                );
                events.push(GameEvent::Resumed);
            }
        }
    }

    /// One running tick: paddles, ball, scoring, collisions, AI
    fn step(&mut self, input: &InputSnapshot, events: &mut Vec<GameEvent>) {
        self.move_paddles(input);

        self.ball.pos += self.ball.vel;

        if let Some(scorer) = self.out_of_bounds_scorer() {
            self.score_point(scorer, events);
            return;
        }

        if wall_bounce(&mut self.ball, self.config.canvas_height) {
            events.push(GameEvent::WallHit);
        }

        let tilt_enabled = self.modes.pvp_mode == PvpMode::Tilting;
        for paddle in &self.paddles {
            if ball_paddle_overlap(&self.ball, paddle) {
                paddle_bounce(&mut self.ball, paddle, tilt_enabled);
                events.push(GameEvent::PaddleHit {
                    player: paddle.owner,
                });
            }
        }

        if self.modes.game_mode == GameMode::PvC {
            let tier = self.config.ai.get(self.modes.difficulty);
            ai::step(&mut self.paddles[1], &self.ball, &tier, &mut self.rng);
            self.paddles[1].clamp_y(self.config.canvas_height);
        }
    }

    fn move_paddles(&mut self, input: &InputSnapshot) {
        let speed = self.config.paddle_speed;
        let pvp_mode = self.modes.pvp_mode;

        match self.modes.control_mode {
            ControlMode::Keyboard => apply_keyboard(&mut self.paddles[0], input, pvp_mode, speed),
            ControlMode::Mouse => {
                if self.modes.mouse_drives_player1() {
                    apply_pointer(&mut self.paddles[0], input);
                }
            }
        }

        if self.modes.game_mode == GameMode::PvP {
            apply_keyboard(&mut self.paddles[1], input, pvp_mode, speed);
        }

        self.constrain_paddles();
    }

    fn out_of_bounds_scorer(&self) -> Option<Player> {
        if self.ball.pos.x < 0.0 {
            Some(Player::Player2)
        } else if self.ball.pos.x > self.config.canvas_width {
            Some(Player::Player1)
        } else {
            None
        }
    }

    /// Award a point and pause. Reaching the winning score ends the match on
    /// the spot instead of scheduling a resume.
    fn score_point(&mut self, scorer: Player, events: &mut Vec<GameEvent>) {
        self.scores.award(scorer);
        self.phase = GamePhase::Paused;
        events.push(GameEvent::Score {
            scorer,
            scores: self.scores,
        });
        log::info!(
            "{:?} scores: {}-{}",
            scorer,
            self.scores.player1,
            self.scores.player2
        );

        self.shaking = true;
        self.timers.schedule(TimerKind::EndShake, self.config.shake_secs);

        if self.scores.has_winner(self.config.winning_score) {
            let report = GameOverReport {
                winner: self.scores.winner(self.modes.game_mode),
                player1_score: self.scores.player1,
                player2_score: self.scores.player2,
            };
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over: {} wins {}-{}",
                report.winner,
                report.player1_score,
                report.player2_score
            );
            events.push(GameEvent::GameOver(report));
        } else {
            self.resume = Some(
                self.timers
                    .schedule(TimerKind::ResumeAfterScore, self.config.score_pause_secs),
            );
        }
    }

    // === Test hooks ===

    /// Place the ball directly
    #[cfg(test)]
    pub fn set_ball(&mut self, pos: Vec2, vel: Vec2) {
        self.ball.pos = pos;
        self.ball.vel = vel;
    }

    #[cfg(test)]
    pub fn set_scores(&mut self, scores: Scoreboard) {
        self.scores = scores;
    }

    #[cfg(test)]
    pub fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        &mut self.paddles[Self::slot(player)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::sim::input::Key;
    use crate::sim::state::Winner;

    fn running_engine() -> Engine {
        let mut engine = Engine::new(GameConfig::default(), 12345);
        engine.start_game();
        engine
    }

    fn idle_input() -> InputSnapshot {
        InputSnapshot::default()
    }

    #[test]
    fn test_start_game_serves_from_center() {
        let mut engine = Engine::new(GameConfig::default(), 1);
        assert_eq!(engine.phase(), GamePhase::Idle);
        let events = engine.start_game();
        assert_eq!(events, vec![GameEvent::GameStarted]);
        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.ball().pos, Vec2::new(400.0, 250.0));
        assert!((engine.ball().speed() - 2.0).abs() < 1e-5);
        // Serve angle within ±45°
        assert!(engine.ball().vel.x.abs() >= engine.ball().vel.y.abs() - 1e-5);
    }

    #[test]
    fn test_idle_engine_does_not_move() {
        let mut engine = Engine::new(GameConfig::default(), 1);
        let before = engine.ball().clone();
        let result = engine.tick(&InputSnapshot::with_keys(&[Key::W]), FRAME_DT);
        assert!(result.events.is_empty());
        assert_eq!(engine.ball(), &before);
        assert_eq!(engine.paddle(Player::Player1).pos.y, 200.0);
    }

    #[test]
    fn test_ball_moves_by_velocity() {
        let mut engine = running_engine();
        engine.set_ball(Vec2::new(400.0, 250.0), Vec2::new(3.0, -1.0));
        engine.tick(&idle_input(), FRAME_DT);
        assert_eq!(engine.ball().pos, Vec2::new(403.0, 249.0));
    }

    #[test]
    fn test_wall_hit_event() {
        let mut engine = running_engine();
        engine.set_ball(Vec2::new(400.0, 1.0), Vec2::new(2.0, -3.0));
        let result = engine.tick(&idle_input(), FRAME_DT);
        assert!(result.contains(&GameEvent::WallHit));
        assert!(engine.ball().vel.y > 0.0);
        assert!(engine.ball().pos.y >= 0.0);
    }

    #[test]
    fn test_paddle_hit_event_and_speedup() {
        let mut engine = running_engine();
        // Heading into the left paddle's center
        engine.set_ball(Vec2::new(47.0, 250.0), Vec2::new(-4.0, 0.0));
        let result = engine.tick(&idle_input(), FRAME_DT);
        assert!(result.contains(&GameEvent::PaddleHit {
            player: Player::Player1
        }));
        assert!((engine.ball().vel.x - 4.1).abs() < 1e-4);
    }

    #[test]
    fn test_speed_after_consecutive_center_hits() {
        let mut engine = running_engine();
        let initial = 2.0_f32;
        engine.set_ball(Vec2::new(60.0, 250.0), Vec2::new(-initial, 0.0));

        let mut hits = 0;
        for _ in 0..20_000 {
            let result = engine.tick(&idle_input(), FRAME_DT);
            hits += result
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::PaddleHit { .. }))
                .count();
            if hits == 6 {
                break;
            }
        }
        assert_eq!(hits, 6);
        let expected = initial * 1.025_f32.powi(6);
        assert!((engine.ball().speed() - expected).abs() < 1e-3);
        assert_eq!(engine.scores(), Scoreboard::default());
    }

    #[test]
    fn test_score_pauses_then_resumes() {
        let mut engine = running_engine();
        engine.set_ball(Vec2::new(1.0, 100.0), Vec2::new(-3.0, 0.0));

        let result = engine.tick(&idle_input(), FRAME_DT);
        assert_eq!(result.phase, GamePhase::Paused);
        assert_eq!(result.scores.player2, 1);
        assert!(engine.is_shaking());

        // The ball is frozen while paused, and no double counting
        let frozen = engine.ball().pos;
        for _ in 0..30 {
            let result = engine.tick(&idle_input(), FRAME_DT);
            assert_eq!(result.scores.player2, 1);
        }
        assert_eq!(engine.ball().pos, frozen);
        assert!(!engine.is_shaking());

        let mut resumed = false;
        for _ in 0..31 {
            let result = engine.tick(&idle_input(), FRAME_DT);
            resumed |= result.contains(&GameEvent::Resumed);
        }
        assert!(resumed);
        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.scores().player2, 1);
    }

    #[test]
    fn test_right_exit_scores_player1() {
        let mut engine = running_engine();
        engine.set_ball(Vec2::new(799.0, 100.0), Vec2::new(3.0, 0.0));
        let result = engine.tick(&idle_input(), FRAME_DT);
        assert!(result.contains(&GameEvent::Score {
            scorer: Player::Player1,
            scores: Scoreboard {
                player1: 1,
                player2: 0
            }
        }));
    }

    #[test]
    fn test_game_over_player1() {
        let mut engine = running_engine();
        engine.set_scores(Scoreboard {
            player1: 10,
            player2: 10,
        });
        engine.set_ball(Vec2::new(799.0, 100.0), Vec2::new(3.0, 0.0));
        let result = engine.tick(&idle_input(), FRAME_DT);
        let report = result.game_over().unwrap();
        assert_eq!(report.winner, Winner::Player1);
        assert_eq!(report.winner.to_string(), "Player 1");
        assert_eq!((report.player1_score, report.player2_score), (11, 10));
        assert_eq!(engine.phase(), GamePhase::GameOver);

        // Terminal: nothing resumes
        for _ in 0..200 {
            let result = engine.tick(&idle_input(), FRAME_DT);
            assert!(!result.contains(&GameEvent::Resumed));
        }
        assert_eq!(engine.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_game_over_computer() {
        let mut engine = Engine::new(GameConfig::default(), 3);
        engine.set_game_mode(GameMode::PvC);
        engine.start_game();
        engine.set_scores(Scoreboard {
            player1: 10,
            player2: 10,
        });
        engine.set_ball(Vec2::new(1.0, 100.0), Vec2::new(-3.0, 0.0));
        let report = engine.tick(&idle_input(), FRAME_DT).game_over().unwrap();
        assert_eq!(report.winner, Winner::Computer);
        assert_eq!((report.player1_score, report.player2_score), (10, 11));
    }

    #[test]
    fn test_reset_cancels_pending_resume() {
        let mut engine = running_engine();
        engine.set_ball(Vec2::new(1.0, 100.0), Vec2::new(-3.0, 0.0));
        engine.tick(&idle_input(), FRAME_DT);
        assert_eq!(engine.phase(), GamePhase::Paused);

        assert!(engine.resume_pending());

        engine.exit_to_menu();
        assert!(!engine.resume_pending());
        for _ in 0..120 {
            let result = engine.tick(&idle_input(), FRAME_DT);
            assert!(!result.contains(&GameEvent::Resumed));
        }
        assert_eq!(engine.phase(), GamePhase::Idle);

        engine.reset_game();
        assert_eq!(engine.scores(), Scoreboard::default());
        assert_eq!(engine.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_restart_during_pause_ignores_old_timer() {
        let mut engine = running_engine();
        engine.set_ball(Vec2::new(1.0, 100.0), Vec2::new(-3.0, 0.0));
        engine.tick(&idle_input(), FRAME_DT);

        // Half a second into the pause, start over
        for _ in 0..30 {
            engine.tick(&idle_input(), FRAME_DT);
        }
        engine.start_game();
        engine.set_ball(Vec2::new(400.0, 250.0), Vec2::new(0.5, 0.0));
        for _ in 0..60 {
            let result = engine.tick(&idle_input(), FRAME_DT);
            assert!(!result.contains(&GameEvent::Resumed));
        }
        // Ball was never re-served by the stale timer
        assert!((engine.ball().pos.x - 430.0).abs() < 1e-3);
    }

    #[test]
    fn test_keyboard_moves_and_clamps_paddles() {
        let mut engine = running_engine();
        let up = InputSnapshot::with_keys(&[Key::W, Key::K]);
        engine.tick(&up, FRAME_DT);
        assert_eq!(engine.paddle(Player::Player1).pos.y, 192.0);
        assert_eq!(engine.paddle(Player::Player2).pos.y, 208.0);

        for _ in 0..100 {
            engine.set_ball(Vec2::new(400.0, 250.0), Vec2::ZERO);
            engine.tick(&up, FRAME_DT);
        }
        assert_eq!(engine.paddle(Player::Player1).pos.y, 0.0);
        assert_eq!(engine.paddle(Player::Player2).pos.y, 400.0);
    }

    #[test]
    fn test_horizontal_mode_half_courts() {
        let mut engine = Engine::new(GameConfig::default(), 9);
        engine.set_pvp_mode(PvpMode::Horizontal);
        engine.start_game();
        let toward_center = InputSnapshot::with_keys(&[Key::D, Key::J]);
        for _ in 0..100 {
            engine.set_ball(Vec2::new(400.0, 50.0), Vec2::ZERO);
            engine.tick(&toward_center, FRAME_DT);
        }
        assert_eq!(engine.paddle(Player::Player1).pos.x, 385.0);
        assert_eq!(engine.paddle(Player::Player2).pos.x, 400.0);

        let outward = InputSnapshot::with_keys(&[Key::A, Key::L]);
        for _ in 0..100 {
            engine.set_ball(Vec2::new(400.0, 50.0), Vec2::ZERO);
            engine.tick(&outward, FRAME_DT);
        }
        assert_eq!(engine.paddle(Player::Player1).pos.x, 0.0);
        assert_eq!(engine.paddle(Player::Player2).pos.x, 785.0);
    }

    #[test]
    fn test_default_mode_pins_x() {
        let mut engine = running_engine();
        engine.paddle_mut(Player::Player1).pos.x = 300.0;
        engine.paddle_mut(Player::Player2).pos.x = 500.0;
        engine.constrain_paddles();
        assert_eq!(engine.paddle(Player::Player1).pos.x, 20.0);
        assert_eq!(engine.paddle(Player::Player2).pos.x, 765.0);
    }

    #[test]
    fn test_tilting_mode_keys() {
        let mut engine = Engine::new(GameConfig::default(), 4);
        engine.set_pvp_mode(PvpMode::Tilting);
        engine.start_game();
        let tilt = InputSnapshot::with_keys(&[Key::Q, Key::O]);
        for _ in 0..40 {
            engine.set_ball(Vec2::new(400.0, 250.0), Vec2::ZERO);
            engine.tick(&tilt, FRAME_DT);
        }
        assert_eq!(engine.paddle(Player::Player1).tilt, -30.0);
        assert_eq!(engine.paddle(Player::Player2).tilt, 30.0);

        // Serving again straightens the paddles
        engine.reset_ball();
        assert_eq!(engine.paddle(Player::Player1).tilt, 0.0);
    }

    #[test]
    fn test_mouse_controls_player1_only_in_pvp() {
        let mut engine = Engine::new(GameConfig::default(), 5);
        engine.set_control_mode(ControlMode::Mouse);
        engine.start_game();
        engine.set_ball(Vec2::new(400.0, 250.0), Vec2::ZERO);

        let mut input = InputSnapshot::with_pointer(100.0);
        input.keys.press(Key::S);
        engine.tick(&input, FRAME_DT);
        // Pointer wins, W/S ignored under mouse control
        assert_eq!(engine.paddle(Player::Player1).pos.y, 50.0);

        // Pointer near the bottom is clamped
        engine.tick(&InputSnapshot::with_pointer(495.0), FRAME_DT);
        assert_eq!(engine.paddle(Player::Player1).pos.y, 400.0);

        // Missing pointer: paddle stays
        engine.tick(&idle_input(), FRAME_DT);
        assert_eq!(engine.paddle(Player::Player1).pos.y, 400.0);
    }

    #[test]
    fn test_pvc_forces_modes() {
        let mut engine = Engine::new(GameConfig::default(), 6);
        engine.set_pvp_mode(PvpMode::Horizontal);
        engine.set_control_mode(ControlMode::Mouse);
        engine.set_game_mode(GameMode::PvC);
        assert_eq!(engine.modes().pvp_mode, PvpMode::Default);
        assert_eq!(engine.modes().control_mode, ControlMode::Keyboard);
    }

    #[test]
    fn test_pvc_ignores_player2_keys() {
        let mut engine = Engine::new(GameConfig::default(), 8);
        engine.set_game_mode(GameMode::PvC);
        engine.set_difficulty(Difficulty::Hard);
        engine.start_game();
        engine.set_ball(Vec2::new(400.0, 250.0), Vec2::ZERO);
        let before = engine.paddle(Player::Player2).pos.y;
        engine.tick(&InputSnapshot::with_keys(&[Key::K]), FRAME_DT);
        // The AI may move up to its speed, but never the 8px a key press would
        assert!((engine.paddle(Player::Player2).pos.y - before).abs() <= 5.0);
    }

    #[test]
    fn test_ai_speed_limits() {
        for (difficulty, limit) in [
            (Difficulty::Easy, 2.0),
            (Difficulty::Medium, 3.0),
            (Difficulty::Hard, 5.0),
        ] {
            let mut engine = Engine::new(GameConfig::default(), 11);
            engine.set_game_mode(GameMode::PvC);
            engine.set_difficulty(difficulty);
            engine.start_game();
            engine.set_ball(Vec2::new(400.0, 10.0), Vec2::ZERO);

            let mut moved = false;
            for _ in 0..50 {
                let before = engine.paddle(Player::Player2).pos.y;
                engine.tick(&idle_input(), FRAME_DT);
                let delta = (engine.paddle(Player::Player2).pos.y - before).abs();
                assert!(delta <= limit + 1e-4, "{difficulty:?} moved {delta}");
                moved |= delta > 0.0;
            }
            assert!(moved);
        }
    }

    #[test]
    fn test_update_settings_mid_flight() {
        let mut engine = running_engine();
        engine.set_ball(Vec2::new(400.0, 250.0), Vec2::new(3.0, -1.5));
        let direction = engine.ball().vel.normalize();

        engine.update_settings("#ff0000", 20.0, 5.0);
        assert!((engine.ball().speed() - 5.0).abs() < 1e-4);
        assert!((engine.ball().vel.normalize() - direction).length() < 1e-5);
        assert_eq!(engine.ball().size, 20.0);
        assert_eq!(engine.ball().color, "#ff0000");

        let settings = engine.ball_settings();
        assert_eq!(settings.color, "#ff0000");
        assert_eq!((settings.size, settings.speed), (20.0, 5.0));

        // Next serve uses the new speed
        engine.reset_ball();
        assert!((engine.ball().speed() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_update_settings_zero_speed_ball() {
        let mut engine = running_engine();
        engine.set_ball(Vec2::new(400.0, 250.0), Vec2::ZERO);
        engine.update_settings("#00ff00", 10.0, 4.0);
        assert_eq!(engine.ball().vel, Vec2::ZERO);
        assert!(!engine.ball().vel.x.is_nan());
    }

    #[test]
    fn test_update_settings_rejects_nan_speed() {
        let mut engine = running_engine();
        engine.set_ball(Vec2::new(400.0, 250.0), Vec2::new(3.0, 1.0));
        engine.update_settings("#ffffff", 10.0, f32::NAN);
        assert_eq!(engine.ball().vel, Vec2::new(3.0, 1.0));
        assert_eq!(engine.config().ball_speed, 2.0);

        // The match still reaches a score
        engine.set_ball(Vec2::new(799.0, 250.0), Vec2::new(3.0, 0.0));
        let result = engine.tick(&idle_input(), FRAME_DT);
        assert_eq!(result.scores.player1, 1);
    }

    #[test]
    fn test_update_settings_rejects_negative_speed_and_bad_size() {
        let mut engine = running_engine();
        engine.set_ball(Vec2::new(400.0, 250.0), Vec2::new(3.0, 1.0));
        engine.update_settings("#ff0000", 10.0, -5.0);
        assert_eq!(engine.ball().vel, Vec2::new(3.0, 1.0));
        assert_eq!(engine.ball().color, "#ffffff");

        engine.update_settings("#ff0000", 0.0, 4.0);
        engine.update_settings("#ff0000", f32::INFINITY, 4.0);
        assert_eq!(engine.ball().size, 10.0);
        assert_eq!(engine.ball_settings().speed, 2.0);
    }

    #[test]
    fn test_resume_pending_until_serve() {
        let mut engine = running_engine();
        assert!(!engine.resume_pending());
        engine.set_ball(Vec2::new(1.0, 100.0), Vec2::new(-3.0, 0.0));
        engine.tick(&idle_input(), FRAME_DT);
        assert!(engine.resume_pending());

        for _ in 0..61 {
            engine.tick(&idle_input(), FRAME_DT);
        }
        assert_eq!(engine.phase(), GamePhase::Running);
        assert!(!engine.resume_pending());
    }

    #[test]
    fn test_game_over_schedules_no_resume() {
        let mut engine = running_engine();
        engine.set_scores(Scoreboard {
            player1: 10,
            player2: 0,
        });
        engine.set_ball(Vec2::new(799.0, 100.0), Vec2::new(3.0, 0.0));
        engine.tick(&idle_input(), FRAME_DT);
        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert!(!engine.resume_pending());
    }

    #[test]
    fn test_reset_game_restores_default_modes() {
        let mut engine = running_engine();
        engine.set_game_mode(GameMode::PvC);
        engine.set_difficulty(Difficulty::Hard);
        engine.reset_game();
        assert_eq!(engine.modes(), ModeState::default());
        assert_eq!(engine.ball().pos, Vec2::new(400.0, 250.0));
    }

    #[test]
    fn test_same_seed_same_serves() {
        let mut a = Engine::new(GameConfig::default(), 42);
        let mut b = Engine::new(GameConfig::default(), 42);
        a.start_game();
        b.start_game();
        assert_eq!(a.ball().vel, b.ball().vel);
    }
}
