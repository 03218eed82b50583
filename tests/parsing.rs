use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use futscout_terminal::athlete::{
    MatchResult, age_on, initials, parse_athlete_detail_json, parse_athletes_json,
    video_type_label,
};
use futscout_terminal::filters::{DominantFoot, Gender, Position, foot_label};
use futscout_terminal::stats::DerivedStats;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_athlete_listing_fixture() {
    let raw = read_fixture("athletes_page.json");
    let page = parse_athletes_json(&raw).expect("fixture should parse");

    assert_eq!(page.athletes.len(), 2);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.total_pages(), 5);

    let rafa = &page.athletes[0];
    assert_eq!(rafa.nickname.as_deref(), Some("Rafa10"));
    assert_eq!(rafa.gender, Some(Gender::Male));
    assert_eq!(rafa.primary_position, Some(Position::Forward));
    assert_eq!(rafa.dominant_foot, Some(DominantFoot::Left));
    assert_eq!(rafa.height, Some(178.0));
    assert_eq!(rafa.weight, Some(72.5));
    assert!(rafa.has_manager);
    assert_eq!(rafa.favorites, 42);
    assert_eq!(rafa.display_name(), "Rafael Souza");
    assert_eq!(rafa.route_identifier(), "Rafa10");
}

#[test]
fn listing_tolerates_nulls_and_unknown_values() {
    let raw = read_fixture("athletes_page.json");
    let page = parse_athletes_json(&raw).expect("fixture should parse");
    let ana = &page.athletes[1];

    assert_eq!(ana.nickname, None);
    assert_eq!(ana.height, None);
    assert_eq!(ana.profile_photo, None);
    assert_eq!(ana.dominant_foot, None);
    assert_eq!(foot_label(ana.dominant_foot), "Two-footed");
    assert_eq!(ana.route_identifier(), "7c1d2e3f-4a5b-4c6d-8e9f-0a1b2c3d4e5f");
}

#[test]
fn parses_athlete_detail_fixture() {
    let raw = read_fixture("athlete_detail.json");
    let athlete = parse_athlete_detail_json(&raw).expect("fixture should parse");

    assert_eq!(athlete.summary.nickname.as_deref(), Some("Rafa10"));
    assert_eq!(athlete.summary.secondary_position, Some(Position::Midfielder));
    assert_eq!(athlete.finished_matches.len(), 2);
    assert_eq!(athlete.finished_matches[0].kind, "CHAMPIONSHIP");
    assert_eq!(athlete.video_feed.len(), 2);
    assert_eq!(video_type_label(&athlete.video_feed[1].kind), "Difficult save");

    let address = athlete.address.as_ref().expect("address should be present");
    assert_eq!(address.city, "Goiania");

    let matches = athlete.all_matches();
    assert_eq!(matches.len(), 5);
    assert_eq!(matches[0].short_date(), "04/05");
    assert_eq!(matches[3].result, MatchResult::Loss);
    assert_eq!(matches[4].result, MatchResult::NotFinished);
    let team = matches[0].my_team.as_ref().expect("team should be present");
    assert_eq!(team.acronym, "ECV");
}

#[test]
fn detail_fixture_stats_match_its_matches() {
    let raw = read_fixture("athlete_detail.json");
    let athlete = parse_athlete_detail_json(&raw).expect("fixture should parse");
    let stats = DerivedStats::compute(&athlete.all_matches());

    assert_eq!((stats.wins, stats.draws, stats.losses), (2, 1, 1));
    assert_eq!(stats.total_matches, 5);
    assert_eq!(stats.average_rating, Some(4.5));
    assert_eq!(stats.win_rate(), 40);
}

#[test]
fn age_uses_whole_years() {
    let raw = read_fixture("athlete_detail.json");
    let athlete = parse_athlete_detail_json(&raw).expect("fixture should parse");

    let birthday = NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date");
    let day_before = NaiveDate::from_ymd_opt(2025, 3, 13).expect("valid date");
    assert_eq!(athlete.age_on(birthday), Some(20));
    assert_eq!(athlete.age_on(day_before), Some(19));
    assert_eq!(age_on("not a date", birthday), None);
    assert_eq!(age_on("2030-01-01", birthday), None);
}

#[test]
fn unknown_match_result_reads_as_not_finished() {
    let raw = r#"{"athlete": {"id": "x", "finishedMatches": [
        {"type": "CUP", "matches": [{"id": "m", "adversaryTeam": "A", "date": "2024-01-01", "result": "ABANDONED"}]}
    ]}}"#;
    let athlete = parse_athlete_detail_json(raw).expect("detail should parse");
    assert_eq!(athlete.all_matches()[0].result, MatchResult::NotFinished);
    assert_eq!(athlete.summary.display_name(), "Unnamed athlete");
}

#[test]
fn malformed_payloads_are_errors() {
    assert!(parse_athletes_json("{\"athletes\": []}").is_err());
    assert!(parse_athletes_json("<html>").is_err());
    assert!(parse_athlete_detail_json("{\"id\": \"x\"}").is_err());
}

#[test]
fn initials_take_first_two_words() {
    assert_eq!(initials("Rafael Souza Lima"), "RS");
    assert_eq!(initials("ana"), "A");
    assert_eq!(initials(""), "");
}
