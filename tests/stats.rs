use futscout_terminal::athlete::{MatchRecord, MatchResult};
use futscout_terminal::stats::{DerivedStats, rating_stars};

fn record(result: MatchResult, rating: Option<f64>) -> MatchRecord {
    MatchRecord::with_result(result, rating)
}

#[test]
fn mixed_results_and_partial_ratings() {
    let matches = vec![
        record(MatchResult::Win, Some(4.0)),
        record(MatchResult::Win, None),
        record(MatchResult::Draw, Some(5.0)),
        record(MatchResult::Loss, None),
        record(MatchResult::NotFinished, None),
    ];
    let stats = DerivedStats::compute(&matches);
    assert_eq!(stats.wins, 2);
    assert_eq!(stats.draws, 1);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.total_matches, 5);
    assert_eq!(stats.average_rating, Some(4.5));
    assert_eq!(stats.decided(), 4);
    assert_eq!(stats.win_rate(), 40);
}

#[test]
fn no_ratings_means_no_average() {
    let matches = vec![
        record(MatchResult::Win, None),
        record(MatchResult::Loss, None),
    ];
    assert_eq!(DerivedStats::compute(&matches).average_rating, None);
    assert_eq!(DerivedStats::compute(&[]), DerivedStats::default());
    assert_eq!(DerivedStats::default().win_rate(), 0);
}

#[test]
fn decided_equals_total_only_without_unfinished_matches() {
    let results = [
        MatchResult::Win,
        MatchResult::Draw,
        MatchResult::Loss,
        MatchResult::NotFinished,
    ];
    // Every sequence of length 3 over the four outcomes.
    for a in results {
        for b in results {
            for c in results {
                let matches = vec![record(a, None), record(b, Some(3.0)), record(c, None)];
                let stats = DerivedStats::compute(&matches);
                let unfinished = [a, b, c].contains(&MatchResult::NotFinished);
                assert!(stats.decided() <= stats.total_matches);
                assert_eq!(stats.decided() == stats.total_matches, !unfinished);
                assert_eq!(stats.average_rating, Some(3.0));
            }
        }
    }
}

#[test]
fn win_rate_rounds_to_nearest_percent() {
    let matches = vec![
        record(MatchResult::Win, None),
        record(MatchResult::Draw, None),
        record(MatchResult::Loss, None),
    ];
    assert_eq!(DerivedStats::compute(&matches).win_rate(), 33);

    let matches = vec![
        record(MatchResult::Win, None),
        record(MatchResult::Win, None),
        record(MatchResult::Loss, None),
    ];
    assert_eq!(DerivedStats::compute(&matches).win_rate(), 67);
}

#[test]
fn stars_fill_up_to_rating() {
    assert_eq!(rating_stars(4.0), "★★★★☆");
    assert_eq!(rating_stars(4.5), "★★★★★");
    assert_eq!(rating_stars(0.0), "☆☆☆☆☆");
}
