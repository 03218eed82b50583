use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::filters::{DominantFoot, Gender, Position, QueryEnum, parse_enum};
use crate::pagination::PaginationMeta;

#[derive(Debug, Clone, Deserialize)]
pub struct AthleteListPage {
    #[serde(default)]
    pub athletes: Vec<AthleteSummary>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AthleteDetailResponse {
    pub athlete: AthleteDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// One card in the listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteSummary {
    pub id: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub dominant_foot: Option<DominantFoot>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub primary_position: Option<Position>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub secondary_position: Option<Position>,
    #[serde(default)]
    pub current_club: Option<String>,
    #[serde(default)]
    pub has_manager: bool,
    #[serde(default)]
    pub user: PublicUser,
    #[serde(default)]
    pub favorites: u32,
}

impl AthleteSummary {
    /// Route segment for this athlete: the nickname when there is one, the id otherwise.
    pub fn route_identifier(&self) -> String {
        self.nickname
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.id)
            .to_string()
    }

    pub fn display_name(&self) -> &str {
        if self.user.name.trim().is_empty() {
            self.nickname.as_deref().unwrap_or("Unnamed athlete")
        } else {
            &self.user.name
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteDetail {
    #[serde(flatten)]
    pub summary: AthleteSummary,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub finished_matches: Vec<MatchGroup>,
    #[serde(default)]
    pub video_feed: Vec<VideoPlay>,
}

impl AthleteDetail {
    /// Every match across competition groups, in payload order.
    pub fn all_matches(&self) -> Vec<MatchRecord> {
        self.finished_matches
            .iter()
            .flat_map(|group| group.matches.iter().cloned())
            .collect()
    }

    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        age_on(self.birth_date.as_deref()?, today)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchGroup {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub competition: Option<String>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
    #[default]
    NotFinished,
}

impl QueryEnum for MatchResult {
    const ALL: &'static [Self] = &[
        MatchResult::Win,
        MatchResult::Draw,
        MatchResult::Loss,
        MatchResult::NotFinished,
    ];

    fn as_str(self) -> &'static str {
        match self {
            MatchResult::Win => "WIN",
            MatchResult::Draw => "DRAW",
            MatchResult::Loss => "LOSS",
            MatchResult::NotFinished => "NOT_FINISHED",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub acronym: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub adversary_team: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub my_team: Option<TeamRef>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_result")]
    pub result: MatchResult,
    #[serde(default)]
    pub my_team_score: Option<u32>,
    #[serde(default)]
    pub adversary_score: Option<u32>,
    #[serde(default)]
    pub performance_rating: Option<f64>,
    #[serde(default)]
    pub is_friendly: bool,
    #[serde(default)]
    pub competition_name: Option<String>,
}

impl MatchRecord {
    /// Bare record for computations and tests.
    pub fn with_result(result: MatchResult, performance_rating: Option<f64>) -> Self {
        Self {
            id: String::new(),
            adversary_team: String::new(),
            date: String::new(),
            my_team: None,
            location: None,
            category: None,
            result,
            my_team_score: None,
            adversary_score: None,
            performance_rating,
            is_friendly: false,
            competition_name: None,
        }
    }

    /// `dd/mm` from an ISO date, or the raw text when it doesn't parse.
    pub fn short_date(&self) -> String {
        match parse_iso_date(&self.date) {
            Some(date) => date.format("%d/%m").to_string(),
            None => self.date.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPlay {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

pub fn parse_athletes_json(raw: &str) -> Result<AthleteListPage> {
    serde_json::from_str(raw.trim()).context("invalid athletes json")
}

pub fn parse_athlete_detail_json(raw: &str) -> Result<AthleteDetail> {
    let response: AthleteDetailResponse =
        serde_json::from_str(raw.trim()).context("invalid athlete detail json")?;
    Ok(response.athlete)
}

pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Whole years between `birth_date` and `today`, using 365.25-day years.
pub fn age_on(birth_date: &str, today: NaiveDate) -> Option<u32> {
    let born = parse_iso_date(birth_date)?;
    let days = (today - born).num_days();
    if days < 0 {
        return None;
    }
    Some((days as f64 / 365.25).floor() as u32)
}

/// Initials from the first two words of a name.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

pub fn video_type_label(kind: &str) -> &str {
    match kind {
        "GOAL" => "Goal",
        "PASS" => "Pass",
        "DISTRIBUTION" => "Distribution",
        "DIFFICULT_SAVE" => "Difficult save",
        "BEST_MOMENTS" => "Best moments",
        other => other,
    }
}

fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: QueryEnum,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_enum))
}

fn lenient_result<'de, D>(deserializer: D) -> Result<MatchResult, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_enum(deserializer)?.unwrap_or_default())
}
