use serde::Serialize;
use crate::models::Analysis;

/// Score statistics shown alongside a project's analysis history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreTrend {
    pub highest: u8,
    pub lowest: u8,
    pub average: f64,
    /// True when the most recent score is lower than the oldest one.
    pub improving: bool,
    pub scored_count: usize,
}

/// Compute the trend over scores ordered most-recent first. Zero scores
/// (never scored) are ignored. `improving` compares only the two ends of
/// the list.
pub fn compute_trend(scores_newest_first: &[u8]) -> ScoreTrend {
    let scores: Vec<u8> = scores_newest_first.iter().copied().filter(|s| *s > 0).collect();

    if scores.is_empty() {
        return ScoreTrend {
            highest: 0,
            lowest: 0,
            average: 0.0,
            improving: false,
            scored_count: 0,
        };
    }

    let sum: u32 = scores.iter().map(|s| *s as u32).sum();
    let improving = scores.len() >= 2 && scores[0] < scores[scores.len() - 1];

    ScoreTrend {
        highest: scores.iter().copied().max().unwrap_or(0),
        lowest: scores.iter().copied().min().unwrap_or(0),
        average: sum as f64 / scores.len() as f64,
        improving,
        scored_count: scores.len(),
    }
}

pub fn trend_for(analyses_newest_first: &[Analysis]) -> ScoreTrend {
    let scores: Vec<u8> = analyses_newest_first.iter().map(|a| a.security_score).collect();
    compute_trend(&scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worsening_history() {
        let trend = compute_trend(&[80, 60, 40]);
        assert_eq!(trend.highest, 80);
        assert_eq!(trend.lowest, 40);
        assert_eq!(trend.average, 60.0);
        assert!(!trend.improving);
    }

    #[test]
    fn test_improving_history() {
        let trend = compute_trend(&[40, 60, 80]);
        assert!(trend.improving);
    }

    #[test]
    fn test_only_endpoints_are_compared() {
        // dips in the middle do not matter
        assert!(compute_trend(&[30, 90, 10, 50]).improving);
    }

    #[test]
    fn test_zero_scores_are_ignored() {
        let trend = compute_trend(&[0, 70, 0, 50]);
        assert_eq!(trend.scored_count, 2);
        assert_eq!(trend.lowest, 50);
        assert_eq!(trend.average, 60.0);
        assert!(!trend.improving);
    }

    #[test]
    fn test_empty_and_single() {
        let empty = compute_trend(&[]);
        assert_eq!(empty.average, 0.0);
        assert!(!empty.improving);

        let single = compute_trend(&[42]);
        assert_eq!(single.highest, 42);
        assert_eq!(single.lowest, 42);
        assert!(!single.improving);
    }
}
