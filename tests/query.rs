use futscout_terminal::filters::{DominantFoot, FilterState, Gender, Position};
use futscout_terminal::query::{deserialize, serialize};

#[test]
fn serializes_only_defined_fields_in_key_order() {
    let filters = FilterState {
        primary_position: Some(Position::Forward),
        min_height: Some(180.0),
        ..FilterState::default()
    };
    assert_eq!(serialize(&filters), "primaryPosition=FORWARD&minHeight=180");
}

#[test]
fn default_filters_serialize_to_nothing() {
    assert_eq!(serialize(&FilterState::default()), "");
    let empty_nickname = FilterState {
        nickname: Some(String::new()),
        ..FilterState::default()
    };
    assert_eq!(serialize(&empty_nickname), "");
}

#[test]
fn round_trips_every_field() {
    let filters = FilterState {
        nickname: Some("joão silva".to_string()),
        gender: Some(Gender::Female),
        dominant_foot: Some(DominantFoot::Right),
        primary_position: Some(Position::Midfielder),
        min_height: Some(165.5),
        max_height: Some(190.0),
        min_weight: Some(55.0),
        max_weight: Some(80.25),
        has_manager: Some(false),
        page: 7,
        limit: Some(24),
    };
    let query = serialize(&filters);
    assert!(query.starts_with("nickname=jo%C3%A3o+silva&primaryPosition=MIDFIELDER"));
    assert!(query.ends_with("&page=7&limit=24"));
    assert_eq!(deserialize(&query), filters);
}

#[test]
fn round_trips_sparse_combinations() {
    let cases = [
        FilterState {
            has_manager: Some(true),
            ..FilterState::default()
        },
        FilterState {
            nickname: Some("a&b=c".to_string()),
            page: 2,
            ..FilterState::default()
        },
        FilterState {
            max_weight: Some(0.5),
            gender: Some(Gender::Other),
            ..FilterState::default()
        },
    ];
    for filters in cases {
        assert_eq!(deserialize(&serialize(&filters)), filters);
    }
}

#[test]
fn malformed_values_become_absent() {
    let filters = deserialize(
        "?primaryPosition=STRIKER&gender=male&minHeight=tall&maxHeight=NaN&hasManager=yes&page=0&limit=-3&foo=bar",
    );
    assert_eq!(filters, FilterState::default());
}

#[test]
fn first_occurrence_wins_and_page_parses() {
    let filters = deserialize("nickname=first&nickname=second&page=3&dominantFoot=LEFT");
    assert_eq!(filters.nickname.as_deref(), Some("first"));
    assert_eq!(filters.page, 3);
    assert_eq!(filters.dominant_foot, Some(DominantFoot::Left));
    assert_eq!(filters.active_count(), 2);
}

#[test]
fn zero_page_and_limit_are_not_written() {
    let filters = FilterState {
        page: 0,
        limit: Some(0),
        ..FilterState::default()
    };
    assert_eq!(serialize(&filters), "");
    assert_eq!(deserialize(&serialize(&filters)), FilterState::default());
}
