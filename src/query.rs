use url::form_urlencoded;

use crate::filters::{DEFAULT_PAGE, FilterState, QueryEnum, parse_enum};

pub const KEY_NICKNAME: &str = "nickname";
pub const KEY_PRIMARY_POSITION: &str = "primaryPosition";
pub const KEY_GENDER: &str = "gender";
pub const KEY_DOMINANT_FOOT: &str = "dominantFoot";
pub const KEY_MIN_HEIGHT: &str = "minHeight";
pub const KEY_MAX_HEIGHT: &str = "maxHeight";
pub const KEY_MIN_WEIGHT: &str = "minWeight";
pub const KEY_MAX_WEIGHT: &str = "maxWeight";
pub const KEY_HAS_MANAGER: &str = "hasManager";
pub const KEY_PAGE: &str = "page";
pub const KEY_LIMIT: &str = "limit";

/// Emission order of `serialize`. Also the parameter order the listing
/// endpoint receives.
pub const KEY_ORDER: [&str; 11] = [
    KEY_NICKNAME,
    KEY_PRIMARY_POSITION,
    KEY_GENDER,
    KEY_DOMINANT_FOOT,
    KEY_MIN_HEIGHT,
    KEY_MAX_HEIGHT,
    KEY_MIN_WEIGHT,
    KEY_MAX_WEIGHT,
    KEY_HAS_MANAGER,
    KEY_PAGE,
    KEY_LIMIT,
];

/// Form-encoded query string (no leading `?`). Absent fields, empty strings
/// and the default page are left out.
pub fn serialize(filters: &FilterState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    for (key, value) in query_pairs(filters) {
        out.append_pair(key, &value);
    }
    out.finish()
}

/// Key/value pairs in `KEY_ORDER`, values already rendered as text.
pub fn query_pairs(filters: &FilterState) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::with_capacity(KEY_ORDER.len());
    if let Some(nickname) = filters.nickname() {
        pairs.push((KEY_NICKNAME, nickname.to_string()));
    }
    if let Some(position) = filters.primary_position {
        pairs.push((KEY_PRIMARY_POSITION, position.as_str().to_string()));
    }
    if let Some(gender) = filters.gender {
        pairs.push((KEY_GENDER, gender.as_str().to_string()));
    }
    if let Some(foot) = filters.dominant_foot {
        pairs.push((KEY_DOMINANT_FOOT, foot.as_str().to_string()));
    }
    push_number(&mut pairs, KEY_MIN_HEIGHT, filters.min_height);
    push_number(&mut pairs, KEY_MAX_HEIGHT, filters.max_height);
    push_number(&mut pairs, KEY_MIN_WEIGHT, filters.min_weight);
    push_number(&mut pairs, KEY_MAX_WEIGHT, filters.max_weight);
    if let Some(has_manager) = filters.has_manager {
        pairs.push((KEY_HAS_MANAGER, has_manager.to_string()));
    }
    if filters.page > DEFAULT_PAGE {
        pairs.push((KEY_PAGE, filters.page.to_string()));
    }
    if let Some(limit) = filters.limit.filter(|l| *l > 0) {
        pairs.push((KEY_LIMIT, limit.to_string()));
    }
    pairs
}

fn push_number(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<f64>) {
    if let Some(value) = value.filter(|v| v.is_finite()) {
        // f64 Display prints 180.0 as "180" and keeps fractional digits otherwise.
        pairs.push((key, value.to_string()));
    }
}

/// Permissive parse: unknown keys are ignored and malformed values become
/// "no constraint". Never fails.
pub fn deserialize(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut filters = FilterState::default();
    let mut seen: Vec<String> = Vec::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        // First occurrence wins, like URLSearchParams::get.
        if seen.iter().any(|k| k.as_str() == key.as_ref()) {
            continue;
        }
        seen.push(key.to_string());

        let value = value.as_ref();
        match key.as_ref() {
            KEY_NICKNAME => filters.nickname = non_empty(value).map(str::to_string),
            KEY_PRIMARY_POSITION => filters.primary_position = parse_enum(value),
            KEY_GENDER => filters.gender = parse_enum(value),
            KEY_DOMINANT_FOOT => filters.dominant_foot = parse_enum(value),
            KEY_MIN_HEIGHT => filters.min_height = parse_number(value),
            KEY_MAX_HEIGHT => filters.max_height = parse_number(value),
            KEY_MIN_WEIGHT => filters.min_weight = parse_number(value),
            KEY_MAX_WEIGHT => filters.max_weight = parse_number(value),
            KEY_HAS_MANAGER => filters.has_manager = parse_bool(value),
            KEY_PAGE => {
                filters.page = value
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|page| *page > 0)
                    .unwrap_or(DEFAULT_PAGE)
            }
            KEY_LIMIT => filters.limit = value.trim().parse::<u32>().ok().filter(|l| *l > 0),
            _ => {}
        }
    }

    filters
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
