//! Score validation: legal tennis set scores and match tiebreak scores.

use crate::models::SetScore;

/// True if the score is a legal completed set: 6-0 through 6-4, 7-5, or 7-6
/// (and the reversed orders). Order-sensitive in the sense that both
/// orientations are listed, so callers never need to normalize.
pub fn valid_set(score: SetScore) -> bool {
    matches!(
        (score.p1, score.p2),
        (6, 0..=4) | (0..=4, 6) | (7, 5) | (5, 7) | (7, 6) | (6, 7)
    )
}

/// True if the score is a legal match tiebreak (played in place of a 3rd set):
/// first to 10 or first to 7, win by 2.
pub fn valid_match_tiebreak(score: SetScore) -> bool {
    let high = score.p1.max(score.p2);
    let low = score.p1.min(score.p2);
    if high - low < 2 {
        return false;
    }
    // 10-point match tiebreak
    if high == 10 && low <= 8 {
        return true;
    }
    if high > 10 && low == high - 2 && low >= 9 {
        return true;
    }
    // 7-point match tiebreak
    if high == 7 && low <= 5 {
        return true;
    }
    if high > 7 && high < 10 && low == high - 2 && low >= 6 {
        return true;
    }
    false
}
