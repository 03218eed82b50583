/// Enum values that travel through query strings and API payloads as their
/// SCREAMING_CASE names.
pub trait QueryEnum: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;
}

/// Total parse: anything outside the allowed set is `None`, never an error.
pub fn parse_enum<T: QueryEnum>(raw: &str) -> Option<T> {
    T::ALL.iter().copied().find(|value| value.as_str() == raw)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl QueryEnum for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female, Gender::Other];

    fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominantFoot {
    Right,
    Left,
}

impl QueryEnum for DominantFoot {
    const ALL: &'static [Self] = &[DominantFoot::Right, DominantFoot::Left];

    fn as_str(self) -> &'static str {
        match self {
            DominantFoot::Right => "RIGHT",
            DominantFoot::Left => "LEFT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl QueryEnum for Position {
    const ALL: &'static [Self] = &[
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GOALKEEPER",
            Position::Defender => "DEFENDER",
            Position::Midfielder => "MIDFIELDER",
            Position::Forward => "FORWARD",
        }
    }
}

pub const DEFAULT_PAGE: u32 = 1;

/// Active search criteria for the listing screen. `None` means "no constraint".
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub nickname: Option<String>,
    pub gender: Option<Gender>,
    pub dominant_foot: Option<DominantFoot>,
    pub primary_position: Option<Position>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub has_manager: Option<bool>,
    pub page: u32,
    pub limit: Option<u32>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            nickname: None,
            gender: None,
            dominant_foot: None,
            primary_position: None,
            min_height: None,
            max_height: None,
            min_weight: None,
            max_weight: None,
            has_manager: None,
            page: DEFAULT_PAGE,
            limit: None,
        }
    }
}

impl FilterState {
    /// Nickname with the empty string folded into "absent".
    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref().filter(|n| !n.is_empty())
    }

    /// Number of criteria that constrain the listing. Paging is not a criterion.
    pub fn active_count(&self) -> usize {
        [
            self.nickname().is_some(),
            self.gender.is_some(),
            self.dominant_foot.is_some(),
            self.primary_position.is_some(),
            self.min_height.is_some(),
            self.max_height.is_some(),
            self.min_weight.is_some(),
            self.max_weight.is_some(),
            self.has_manager.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Merge a partial update. Any criteria change sends the listing back to
    /// the first page; the page size survives.
    pub fn apply(&mut self, patch: FilterPatch) {
        fn merge<T>(slot: &mut Option<T>, update: Option<Option<T>>) {
            if let Some(value) = update {
                *slot = value;
            }
        }

        merge(&mut self.nickname, patch.nickname);
        if self.nickname.as_deref() == Some("") {
            self.nickname = None;
        }
        merge(&mut self.gender, patch.gender);
        merge(&mut self.dominant_foot, patch.dominant_foot);
        merge(&mut self.primary_position, patch.primary_position);
        merge(&mut self.min_height, patch.min_height);
        merge(&mut self.max_height, patch.max_height);
        merge(&mut self.min_weight, patch.min_weight);
        merge(&mut self.max_weight, patch.max_weight);
        merge(&mut self.has_manager, patch.has_manager);
        self.page = DEFAULT_PAGE;
    }

    /// Same criteria, first page, page size kept.
    pub fn cleared(&self) -> Self {
        Self {
            limit: self.limit,
            ..Self::default()
        }
    }
}

/// Partial filter update: outer `None` keeps the field, `Some(None)` clears
/// it, `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub nickname: Option<Option<String>>,
    pub gender: Option<Option<Gender>>,
    pub dominant_foot: Option<Option<DominantFoot>>,
    pub primary_position: Option<Option<Position>>,
    pub min_height: Option<Option<f64>>,
    pub max_height: Option<Option<f64>>,
    pub min_weight: Option<Option<f64>>,
    pub max_weight: Option<Option<f64>>,
    pub has_manager: Option<Option<bool>>,
}

impl FilterPatch {
    pub fn nickname(value: &str) -> Self {
        let value = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
        Self {
            nickname: Some(value),
            ..Self::default()
        }
    }

    pub fn primary_position(position: Option<Position>) -> Self {
        Self {
            primary_position: Some(position),
            ..Self::default()
        }
    }

    /// A patch that overwrites every criterion with the values in `filters`.
    pub fn replace_with(filters: &FilterState) -> Self {
        Self {
            nickname: Some(filters.nickname().map(str::to_string)),
            gender: Some(filters.gender),
            dominant_foot: Some(filters.dominant_foot),
            primary_position: Some(filters.primary_position),
            min_height: Some(filters.min_height),
            max_height: Some(filters.max_height),
            min_weight: Some(filters.min_weight),
            max_weight: Some(filters.max_weight),
            has_manager: Some(filters.has_manager),
        }
    }
}

pub fn position_label(position: Position) -> &'static str {
    match position {
        Position::Goalkeeper => "Goalkeeper",
        Position::Defender => "Defender",
        Position::Midfielder => "Midfielder",
        Position::Forward => "Forward",
    }
}

pub fn position_short_label(position: Position) -> &'static str {
    match position {
        Position::Goalkeeper => "GK",
        Position::Defender => "DEF",
        Position::Midfielder => "MID",
        Position::Forward => "FWD",
    }
}

/// Horizontal spot on the pitch, in percent from the own goal line.
pub fn field_marker_percent(position: Option<Position>) -> u16 {
    match position {
        Some(Position::Goalkeeper) => 12,
        Some(Position::Defender) => 30,
        Some(Position::Midfielder) | None => 50,
        Some(Position::Forward) => 78,
    }
}

pub fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Male",
        Gender::Female => "Female",
        Gender::Other => "Other",
    }
}

/// Athletes whose foot is neither left nor right are shown as two-footed.
pub fn foot_label(foot: Option<DominantFoot>) -> &'static str {
    match foot {
        Some(DominantFoot::Right) => "Right-footed",
        Some(DominantFoot::Left) => "Left-footed",
        None => "Two-footed",
    }
}

pub fn manager_label(has_manager: Option<bool>) -> &'static str {
    match has_manager {
        Some(true) => "With manager",
        Some(false) => "Without manager",
        None => "All",
    }
}
