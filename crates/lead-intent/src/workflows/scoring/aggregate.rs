pub const MAX_FINAL_SCORE: u8 = 100;

/// Combine the rule score and AI points into the final 0..=100 score.
pub fn aggregate(rule_score: u8, ai_points: u8) -> u8 {
    let total = i32::from(rule_score) + i32::from(ai_points);
    total.clamp(0, i32::from(MAX_FINAL_SCORE)) as u8
}
