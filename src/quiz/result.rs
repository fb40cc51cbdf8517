use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTier {
    High,
    Medium,
    Low,
}

impl FeedbackTier {
    /// Tier for a percentage given in tenths (700 == 70.0%).
    fn from_tenths(tenths: u32) -> Self {
        if tenths >= 800 {
            FeedbackTier::High
        } else if tenths >= 500 {
            FeedbackTier::Medium
        } else {
            FeedbackTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackTier::High => "high",
            FeedbackTier::Medium => "medium",
            FeedbackTier::Low => "low",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FeedbackTier::High => "Great job! You're mastering CS basics!",
            FeedbackTier::Medium => "Good effort! Keep practicing to improve!",
            FeedbackTier::Low => "Don't worry, review and try again to boost your score!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    /// Rounded half-up to one decimal place.
    pub percentage: f64,
    pub tier: FeedbackTier,
}

impl QuizResult {
    pub fn new(score: u32, total: u32) -> Self {
        let tenths = percentage_tenths(score, total);
        Self {
            score,
            total,
            percentage: f64::from(tenths) / 10.0,
            tier: FeedbackTier::from_tenths(tenths),
        }
    }
}

impl fmt::Display for QuizResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You scored {} out of {} ({:.1}%)!",
            self.score, self.total, self.percentage
        )
    }
}

/// score / total as a percentage in tenths, rounded half-up in integer
/// arithmetic so 6.25 becomes 6.3.
fn percentage_tenths(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (score, total) = (u64::from(score), u64::from(total));
    ((score * 2000 + total) / (2 * total)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_of_ten_is_medium() {
        let result = QuizResult::new(7, 10);
        assert_eq!(result.score, 7);
        assert_eq!(result.total, 10);
        assert_eq!(result.percentage, 70.0);
        assert_eq!(result.tier, FeedbackTier::Medium);
        assert_eq!(result.tier.as_str(), "medium");
        assert_eq!(result.to_string(), "You scored 7 out of 10 (70.0%)!");
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(QuizResult::new(8, 10).tier, FeedbackTier::High);
        assert_eq!(QuizResult::new(10, 10).tier, FeedbackTier::High);
        assert_eq!(QuizResult::new(5, 10).tier, FeedbackTier::Medium);
        assert_eq!(QuizResult::new(4, 10).tier, FeedbackTier::Low);
        assert_eq!(QuizResult::new(0, 10).tier, FeedbackTier::Low);
    }

    #[test]
    fn rounds_half_up_to_one_decimal() {
        assert_eq!(QuizResult::new(2, 3).percentage, 66.7);
        assert_eq!(QuizResult::new(1, 3).percentage, 33.3);
        assert_eq!(QuizResult::new(1, 16).percentage, 6.3);
        assert_eq!(QuizResult::new(1, 8).percentage, 12.5);
    }

    #[test]
    fn rounding_applies_before_tier() {
        // 79.96% rounds to 80.0%.
        let result = QuizResult::new(1999, 2500);
        assert_eq!(result.percentage, 80.0);
        assert_eq!(result.tier, FeedbackTier::High);
    }

    #[test]
    fn empty_run_scores_zero() {
        let result = QuizResult::new(0, 0);
        assert_eq!(result.percentage, 0.0);
        assert_eq!(result.tier, FeedbackTier::Low);
    }

    #[test]
    fn tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FeedbackTier::High).unwrap(), "\"high\"");
    }
}
