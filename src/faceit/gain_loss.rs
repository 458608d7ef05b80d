//! Projected Elo gain/loss for an unresolved match.
//!
//! Faceit never exposes the points a match is worth up front, so the
//! projection is reconstructed from what the matchroom does expose. Two
//! models, selected by whether the match carries a win-probability stat:
//!
//! - Ranked matchmaking publishes faction1's win probability. A fixed
//!   pool of points (60 for "super" matches, 50 otherwise) is split by
//!   that probability; the heavier favorite stands to gain less.
//! - Hub matches publish no probability, so the split falls back to the
//!   standard logistic transform of the rating difference between the
//!   factions' average Elo.
//!
//! Both models are zero-sum: one faction's gain is the other's loss and
//! the two gains always sum to the pool.

/// Projected outcome for one faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GainLoss {
    pub gain: i32,
    pub loss: i32,
}

/// Probability model for ranked matchmaking matches.
///
/// `win_probability` is faction1's, as published by the matchroom.
pub fn calculate_gain_loss(is_super_match: bool, is_faction1: bool, win_probability: f64) -> GainLoss {
    let max_elo: i32 = if is_super_match { 60 } else { 50 };
    let faction1_gain = (max_elo as f64 - win_probability * max_elo as f64).round() as i32;

    if is_faction1 {
        GainLoss {
            gain: faction1_gain,
            loss: max_elo - faction1_gain,
        }
    } else {
        GainLoss {
            gain: max_elo - faction1_gain,
            loss: faction1_gain,
        }
    }
}

/// Average-Elo model for hub matches, pool fixed at 50.
pub fn calculate_gain_loss_hub(
    is_faction1: bool,
    faction1_elo_avg: f64,
    faction2_elo_avg: f64,
) -> GainLoss {
    const MAX_ELO: i32 = 50;

    let diff_factor = 10f64.powf((faction2_elo_avg - faction1_elo_avg) / 400.0);
    let faction1_gain = (MAX_ELO as f64 * (1.0 - 1.0 / (1.0 + diff_factor))).round() as i32;

    if is_faction1 {
        GainLoss {
            gain: faction1_gain,
            loss: MAX_ELO - faction1_gain,
        }
    } else {
        GainLoss {
            gain: MAX_ELO - faction1_gain,
            loss: faction1_gain,
        }
    }
}
