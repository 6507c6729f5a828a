//! Computer opponent
//!
//! Tracks the ball's current height with difficulty-scaled noise and moves
//! at a fixed speed, holding still inside a small deadband.

use rand::Rng;

use super::state::{Ball, Paddle};
use crate::config::AiTier;
use crate::consts::AI_DEADBAND;

/// Noisy guess of where the ball is vertically
pub fn predict_ball_y<R: Rng>(ball: &Ball, tier: &AiTier, rng: &mut R) -> f32 {
    let error = (rng.random::<f32>() - 0.5) * tier.noise_span();
    ball.pos.y + error
}

/// Move the AI paddle one step toward `predicted_y`.
/// Returns the signed distance moved (at most `tier.speed`).
pub fn steer_toward(paddle: &mut Paddle, predicted_y: f32, tier: &AiTier) -> f32 {
    let target = predicted_y - paddle.height / 2.0;
    let step = if target < paddle.pos.y - AI_DEADBAND {
        -tier.speed
    } else if target > paddle.pos.y + AI_DEADBAND {
        tier.speed
    } else {
        0.0
    };
    paddle.pos.y += step;
    step
}

/// One AI tick: predict, then steer
pub fn step<R: Rng>(paddle: &mut Paddle, ball: &Ball, tier: &AiTier, rng: &mut R) -> f32 {
    let predicted = predict_ball_y(ball, tier, rng);
    steer_toward(paddle, predicted, tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::Player;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_deadband_prevents_jitter() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(Player::Player2, &config);
        let tier = AiTier::new(3.0, 1.0);
        // Paddle center at 250; target within ±5 px
        assert_eq!(steer_toward(&mut paddle, 254.0, &tier), 0.0);
        assert_eq!(steer_toward(&mut paddle, 246.0, &tier), 0.0);
        assert_eq!(paddle.pos.y, 200.0);

        assert_eq!(steer_toward(&mut paddle, 300.0, &tier), 3.0);
        assert_eq!(steer_toward(&mut paddle, 0.0, &tier), -3.0);
    }

    #[test]
    fn test_noise_stays_in_band() {
        let config = GameConfig::default();
        let ball = Ball::new(&config);
        let tier = AiTier::new(2.0, 0.5);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let y = predict_ball_y(&ball, &tier, &mut rng);
            assert!((y - ball.pos.y).abs() <= 25.0);
        }
    }

    #[test]
    fn test_perfect_accuracy_has_no_noise() {
        let config = GameConfig::default();
        let ball = Ball::new(&config);
        let tier = AiTier::new(5.0, 1.0);
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(predict_ball_y(&ball, &tier, &mut rng), ball.pos.y);
    }
}
