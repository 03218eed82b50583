use crate::athlete::{MatchRecord, MatchResult};

/// Figures computed client-side from an athlete's match list. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedStats {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub total_matches: u32,
    /// Mean over rated matches only; `None` when no match carries a rating.
    pub average_rating: Option<f64>,
}

impl DerivedStats {
    /// Ratings are averaged as given; out-of-range values are not clamped.
    pub fn compute(matches: &[MatchRecord]) -> Self {
        let mut stats = DerivedStats::default();
        let mut rating_sum = 0.0;
        let mut rated = 0u32;

        for record in matches {
            stats.total_matches += 1;
            match record.result {
                MatchResult::Win => stats.wins += 1,
                MatchResult::Draw => stats.draws += 1,
                MatchResult::Loss => stats.losses += 1,
                MatchResult::NotFinished => {}
            }
            if let Some(rating) = record.performance_rating {
                rating_sum += rating;
                rated += 1;
            }
        }

        if rated > 0 {
            stats.average_rating = Some(rating_sum / rated as f64);
        }
        stats
    }

    pub fn decided(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    /// Wins over all matches as a rounded percentage.
    pub fn win_rate(&self) -> u32 {
        if self.total_matches == 0 {
            return 0;
        }
        (self.wins as f64 / self.total_matches as f64 * 100.0).round() as u32
    }
}

/// Filled/empty stars for a 1-5 rating.
pub fn rating_stars(rating: f64) -> String {
    (0..5)
        .map(|idx| if (idx as f64) < rating { '★' } else { '☆' })
        .collect()
}
