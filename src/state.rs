use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::athlete::{AthleteDetail, AthleteListPage, AthleteSummary, MatchRecord};
use crate::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use crate::filters::{DominantFoot, FilterPatch, FilterState, Position, QueryEnum};
use crate::pagination::{PaginationMeta, clamp_page, local_total_pages, slice_page};
use crate::query;
use crate::router::{Location, Route};
use crate::stats::DerivedStats;

pub const MATCHES_PER_PAGE: usize = 3;
pub const VIDEO_FEED_MAX: usize = 8;
const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Listing,
    Detail,
    NotFound,
}

/// Quick-filter bar order; `None` is "all positions".
pub const QUICK_POSITIONS: [Option<Position>; 5] = [
    None,
    Some(Position::Goalkeeper),
    Some(Position::Defender),
    Some(Position::Midfielder),
    Some(Position::Forward),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Position,
    Gender,
    Foot,
    Manager,
    MinHeight,
    MaxHeight,
    MinWeight,
    MaxWeight,
}

impl FilterField {
    pub const ALL: [FilterField; 8] = [
        FilterField::Position,
        FilterField::Gender,
        FilterField::Foot,
        FilterField::Manager,
        FilterField::MinHeight,
        FilterField::MaxHeight,
        FilterField::MinWeight,
        FilterField::MaxWeight,
    ];

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            FilterField::MinHeight
                | FilterField::MaxHeight
                | FilterField::MinWeight
                | FilterField::MaxWeight
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Position => "Position",
            FilterField::Gender => "Gender",
            FilterField::Foot => "Dominant foot",
            FilterField::Manager => "Manager",
            FilterField::MinHeight => "Min height (cm)",
            FilterField::MaxHeight => "Max height (cm)",
            FilterField::MinWeight => "Min weight (kg)",
            FilterField::MaxWeight => "Max weight (kg)",
        }
    }
}

/// Draft edited in the advanced-filters modal. Numeric fields are kept as
/// typed text until the draft is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterForm {
    pub draft: FilterState,
    pub selected: usize,
    pub min_height: String,
    pub max_height: String,
    pub min_weight: String,
    pub max_weight: String,
}

impl FilterForm {
    pub fn from_filters(filters: &FilterState) -> Self {
        let text = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        Self {
            draft: filters.clone(),
            selected: 0,
            min_height: text(filters.min_height),
            max_height: text(filters.max_height),
            min_weight: text(filters.min_weight),
            max_weight: text(filters.max_weight),
        }
    }

    pub fn field(&self) -> FilterField {
        FilterField::ALL[self.selected.min(FilterField::ALL.len() - 1)]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % FilterField::ALL.len();
    }

    pub fn select_prev(&mut self) {
        if self.selected == 0 {
            self.selected = FilterField::ALL.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Step the selected choice field through "all" and its values.
    pub fn cycle(&mut self, forward: bool) {
        match self.field() {
            FilterField::Position => {
                self.draft.primary_position = cycle_enum(self.draft.primary_position, forward)
            }
            FilterField::Gender => self.draft.gender = cycle_enum(self.draft.gender, forward),
            FilterField::Foot => {
                self.draft.dominant_foot = cycle_enum(self.draft.dominant_foot, forward)
            }
            FilterField::Manager => {
                const OPTIONS: [Option<bool>; 3] = [None, Some(true), Some(false)];
                self.draft.has_manager = cycle_options(&OPTIONS, self.draft.has_manager, forward);
            }
            _ => {}
        }
    }

    pub fn push_char(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.') {
            return;
        }
        if let Some(text) = self.text_mut(self.field())
            && text.len() < 6
        {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(text) = self.text_mut(self.field()) {
            text.pop();
        }
    }

    pub fn text(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::MinHeight => Some(&self.min_height),
            FilterField::MaxHeight => Some(&self.max_height),
            FilterField::MinWeight => Some(&self.min_weight),
            FilterField::MaxWeight => Some(&self.max_weight),
            _ => None,
        }
    }

    fn text_mut(&mut self, field: FilterField) -> Option<&mut String> {
        match field {
            FilterField::MinHeight => Some(&mut self.min_height),
            FilterField::MaxHeight => Some(&mut self.max_height),
            FilterField::MinWeight => Some(&mut self.min_weight),
            FilterField::MaxWeight => Some(&mut self.max_weight),
            _ => None,
        }
    }

    /// The draft with typed numbers parsed; unparsable text means "no constraint".
    pub fn to_filters(&self) -> FilterState {
        let number = |text: &str| text.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        FilterState {
            min_height: number(&self.min_height),
            max_height: number(&self.max_height),
            min_weight: number(&self.min_weight),
            max_weight: number(&self.max_weight),
            ..self.draft.clone()
        }
    }
}

fn cycle_enum<T: QueryEnum + PartialEq>(current: Option<T>, forward: bool) -> Option<T> {
    let options: Vec<Option<T>> = std::iter::once(None)
        .chain(T::ALL.iter().copied().map(Some))
        .collect();
    cycle_options(&options, current, forward)
}

fn cycle_options<T: Copy + PartialEq>(options: &[Option<T>], current: Option<T>, forward: bool) -> Option<T> {
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % options.len()
    } else if idx == 0 {
        options.len() - 1
    } else {
        idx - 1
    };
    options[next]
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub location: Location,
    /// Filters read back from the current listing route.
    pub filters: FilterState,
    pub listing: Option<AthleteListPage>,
    pub listing_loading: bool,
    pub listing_error: Option<String>,
    pub listing_seq: u64,
    pub selected: usize,
    pub search_input: String,
    pub search_active: bool,
    pub search_debounce: Debouncer<String>,
    pub filter_form: Option<FilterForm>,
    pub detail_identifier: Option<String>,
    pub detail: Option<AthleteDetail>,
    pub detail_matches: Vec<MatchRecord>,
    pub detail_stats: Option<DerivedStats>,
    pub detail_loading: bool,
    pub detail_seq: u64,
    pub matches_page: u32,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    next_seq: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Route::Home, DEFAULT_DEBOUNCE)
    }
}

impl AppState {
    /// Nothing is fetched until `reload` (or a navigation) is called.
    pub fn new(start: Route, search_debounce: Duration) -> Self {
        let screen = screen_for(&start);
        let filters = match &start {
            Route::Players { query } => query::deserialize(query),
            _ => FilterState::default(),
        };
        Self {
            screen,
            location: Location::new(start),
            search_input: filters.nickname().unwrap_or_default().to_string(),
            filters,
            listing: None,
            listing_loading: false,
            listing_error: None,
            listing_seq: 0,
            selected: 0,
            search_active: false,
            search_debounce: Debouncer::new(search_debounce),
            filter_form: None,
            detail_identifier: None,
            detail: None,
            detail_matches: Vec::new(),
            detail_stats: None,
            detail_loading: false,
            detail_seq: 0,
            matches_page: 1,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
            next_seq: 0,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn navigate(&mut self, route: Route) -> Option<ProviderCommand> {
        self.location.navigate(route);
        self.enter_route()
    }

    pub fn back(&mut self) -> Option<ProviderCommand> {
        self.location.back()?;
        self.search_active = false;
        self.search_debounce.cancel_all();
        self.enter_route()
    }

    /// Re-read the current route and fetch again.
    pub fn reload(&mut self) -> Option<ProviderCommand> {
        self.enter_route()
    }

    fn enter_route(&mut self) -> Option<ProviderCommand> {
        let route = self.location.current().clone();
        self.screen = screen_for(&route);
        self.filter_form = None;
        match route {
            Route::Home => None,
            Route::Players { query } => {
                self.filters = query::deserialize(&query);
                if !self.search_active {
                    self.search_input = self.filters.nickname().unwrap_or_default().to_string();
                }
                self.listing_loading = true;
                self.listing_error = None;
                self.selected = 0;
                let seq = self.issue_seq();
                self.listing_seq = seq;
                Some(ProviderCommand::FetchListing {
                    seq,
                    filters: self.filters.clone(),
                })
            }
            Route::Player { identifier } => {
                self.detail_identifier = Some(identifier.clone());
                self.detail = None;
                self.detail_matches.clear();
                self.detail_stats = None;
                self.detail_loading = true;
                self.matches_page = 1;
                let seq = self.issue_seq();
                self.detail_seq = seq;
                Some(ProviderCommand::FetchAthlete { seq, identifier })
            }
        }
    }

    fn issue_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Filters of the route being shown, or the defaults away from the listing.
    pub fn route_filters(&self) -> FilterState {
        match self.location.current() {
            Route::Players { query } => query::deserialize(query),
            _ => self.filters.cleared(),
        }
    }

    pub fn apply_filter_patch(&mut self, patch: FilterPatch) -> Option<ProviderCommand> {
        let mut filters = self.route_filters();
        filters.apply(patch);
        self.show_listing(&filters)
    }

    /// Listing-to-listing moves rewrite the current entry; arriving from
    /// another screen records history.
    fn show_listing(&mut self, filters: &FilterState) -> Option<ProviderCommand> {
        let route = Route::players(query::serialize(filters));
        if matches!(self.location.current(), Route::Players { .. }) {
            self.location.replace(route);
            self.enter_route()
        } else {
            self.navigate(route)
        }
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }

    pub fn set_quick_position(&mut self, position: Option<Position>) -> Option<ProviderCommand> {
        self.apply_filter_patch(FilterPatch::primary_position(position))
    }

    pub fn cycle_quick_position(&mut self, forward: bool) -> Option<ProviderCommand> {
        let next = cycle_options(&QUICK_POSITIONS, self.filters.primary_position, forward);
        self.set_quick_position(next)
    }

    pub fn listing_meta(&self) -> Option<PaginationMeta> {
        self.listing.as_ref().map(|page| page.pagination)
    }

    /// Clamp `page` into the known page range and navigate to it.
    pub fn go_to_page(&mut self, page: u32) -> Option<ProviderCommand> {
        let meta = self.listing_meta()?;
        let page = clamp_page(page, meta.total_pages());
        if page == self.filters.page {
            return None;
        }
        let mut filters = self.route_filters();
        filters.page = page;
        self.show_listing(&filters)
    }

    pub fn next_page(&mut self) -> Option<ProviderCommand> {
        let meta = self.listing_meta()?;
        if !meta.has_next() {
            return None;
        }
        self.go_to_page(meta.current_page() + 1)
    }

    pub fn prev_page(&mut self) -> Option<ProviderCommand> {
        let meta = self.listing_meta()?;
        if !meta.has_prev() {
            return None;
        }
        self.go_to_page(meta.current_page() - 1)
    }

    pub fn start_search(&mut self) {
        self.search_active = true;
    }

    pub fn search_push(&mut self, c: char, now: Instant) {
        self.search_input.push(c);
        self.search_debounce.schedule(self.search_input.clone(), now);
    }

    pub fn search_pop(&mut self, now: Instant) {
        if self.search_input.pop().is_some() {
            self.search_debounce.schedule(self.search_input.clone(), now);
        }
    }

    /// Leave the search box, flushing a pending search right away.
    pub fn finish_search(&mut self) -> Option<ProviderCommand> {
        self.search_active = false;
        if !self.search_debounce.is_pending() {
            return None;
        }
        self.search_debounce.cancel_all();
        let nickname = self.search_input.clone();
        self.search_nickname(&nickname)
    }

    /// Drive timers; returns the fetch a fired search produced.
    pub fn tick(&mut self, now: Instant) -> Option<ProviderCommand> {
        let nickname = self.search_debounce.fire_due(now)?;
        self.search_nickname(&nickname)
    }

    fn search_nickname(&mut self, nickname: &str) -> Option<ProviderCommand> {
        let current = self.route_filters();
        if current.nickname().unwrap_or_default() == nickname
            && matches!(self.location.current(), Route::Players { .. })
        {
            return None;
        }
        self.apply_filter_patch(FilterPatch::nickname(nickname))
    }

    pub fn open_filters(&mut self) {
        self.filter_form = Some(FilterForm::from_filters(&self.route_filters()));
    }

    pub fn close_filters(&mut self) {
        self.filter_form = None;
    }

    pub fn apply_filters_form(&mut self) -> Option<ProviderCommand> {
        let form = self.filter_form.take()?;
        let draft = form.to_filters();
        self.search_debounce.cancel_all();
        self.search_input = draft.nickname().unwrap_or_default().to_string();
        self.apply_filter_patch(FilterPatch::replace_with(&draft))
    }

    pub fn clear_filters(&mut self) -> Option<ProviderCommand> {
        self.filter_form = None;
        self.search_debounce.cancel_all();
        self.search_input.clear();
        let cleared = self.route_filters().cleared();
        self.show_listing(&cleared)
    }

    pub fn listing_athletes(&self) -> &[AthleteSummary] {
        self.listing
            .as_ref()
            .map(|page| page.athletes.as_slice())
            .unwrap_or(&[])
    }

    pub fn selected_athlete(&self) -> Option<&AthleteSummary> {
        self.listing_athletes().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let total = self.listing_athletes().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.listing_athletes().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn open_selected(&mut self) -> Option<ProviderCommand> {
        let identifier = self.selected_athlete()?.route_identifier();
        self.navigate(Route::player(identifier))
    }

    pub fn matches_total_pages(&self) -> u32 {
        local_total_pages(self.detail_matches.len(), MATCHES_PER_PAGE)
    }

    pub fn visible_matches(&self) -> &[MatchRecord] {
        slice_page(&self.detail_matches, self.matches_page, MATCHES_PER_PAGE)
    }

    pub fn matches_next(&mut self) {
        self.matches_page = clamp_page(self.matches_page + 1, self.matches_total_pages());
    }

    pub fn matches_prev(&mut self) {
        self.matches_page = clamp_page(self.matches_page.saturating_sub(1), self.matches_total_pages());
    }

    pub fn quick_position_index(&self) -> usize {
        QUICK_POSITIONS
            .iter()
            .position(|p| *p == self.filters.primary_position)
            .unwrap_or(0)
    }
}

/// Labels for whatever the modal draft currently holds.
pub fn form_value_label(form: &FilterForm, field: FilterField) -> String {
    use crate::filters::{gender_label, manager_label, position_label};
    match field {
        FilterField::Position => form
            .draft
            .primary_position
            .map(position_label)
            .unwrap_or("All")
            .to_string(),
        FilterField::Gender => form
            .draft
            .gender
            .map(gender_label)
            .unwrap_or("All")
            .to_string(),
        FilterField::Foot => match form.draft.dominant_foot {
            Some(DominantFoot::Right) => "Right".to_string(),
            Some(DominantFoot::Left) => "Left".to_string(),
            None => "All".to_string(),
        },
        FilterField::Manager => manager_label(form.draft.has_manager).to_string(),
        numeric => form.text(numeric).unwrap_or_default().to_string(),
    }
}

fn screen_for(route: &Route) -> Screen {
    match route {
        Route::Home => Screen::Home,
        Route::Players { .. } => Screen::Listing,
        Route::Player { .. } => Screen::Detail,
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetListing {
        seq: u64,
        page: AthleteListPage,
    },
    ListingFailed {
        seq: u64,
        error: String,
    },
    SetAthlete {
        seq: u64,
        athlete: Box<AthleteDetail>,
    },
    AthleteNotFound {
        seq: u64,
        identifier: String,
        reason: String,
    },
    Log(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCommand {
    FetchListing { seq: u64, filters: FilterState },
    FetchAthlete { seq: u64, identifier: String },
}

/// Responses carry the sequence number of the request that produced them;
/// anything older than the latest request for that view is dropped. A listing
/// that lands past its last page returns the refetch of the last page.
pub fn apply_delta(state: &mut AppState, delta: Delta) -> Option<ProviderCommand> {
    match delta {
        Delta::SetListing { seq, page } => {
            if seq != state.listing_seq {
                state.push_log(format!("[INFO] Dropped stale listing response #{seq}"));
                return None;
            }
            state.listing = Some(page);
            state.listing_loading = false;
            state.listing_error = None;
            let total = state.listing_athletes().len();
            if state.selected >= total {
                state.selected = total.saturating_sub(1);
            }
            let meta = state.listing_meta()?;
            let last = meta.total_pages();
            if last > 0 && meta.page.max(state.filters.page) > last {
                state.push_log(format!(
                    "[INFO] Page {} is past the end; showing page {last}",
                    meta.page
                ));
                return state.go_to_page(last);
            }
        }
        Delta::ListingFailed { seq, error } => {
            if seq != state.listing_seq {
                return None;
            }
            state.listing = None;
            state.listing_loading = false;
            state.listing_error = Some("Failed to load athletes".to_string());
            state.push_log(format!("[WARN] Listing error: {error}"));
        }
        Delta::SetAthlete { seq, athlete } => {
            if seq != state.detail_seq {
                state.push_log(format!("[INFO] Dropped stale athlete response #{seq}"));
                return None;
            }
            let matches = athlete.all_matches();
            state.detail_stats = Some(DerivedStats::compute(&matches));
            state.detail_matches = matches;
            state.detail = Some(*athlete);
            state.detail_loading = false;
            state.matches_page = 1;
        }
        Delta::AthleteNotFound {
            seq,
            identifier,
            reason,
        } => {
            if seq != state.detail_seq {
                return None;
            }
            state.detail_loading = false;
            state.detail = None;
            state.push_log(format!("[WARN] Athlete '{identifier}' not found: {reason}"));
            if state.screen == Screen::Detail {
                state.screen = Screen::NotFound;
            }
        }
        Delta::Log(msg) => state.push_log(msg),
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{FilterField, FilterForm};
    use crate::filters::{FilterState, Gender, Position};

    #[test]
    fn form_cycles_through_all_then_values() {
        let mut form = FilterForm::from_filters(&FilterState::default());
        assert_eq!(form.field(), FilterField::Position);
        form.cycle(true);
        assert_eq!(form.draft.primary_position, Some(Position::Goalkeeper));
        form.cycle(false);
        form.cycle(false);
        assert_eq!(form.draft.primary_position, Some(Position::Forward));

        form.select_next();
        form.cycle(false);
        assert_eq!(form.draft.gender, Some(Gender::Other));
    }

    #[test]
    fn form_numeric_text_parses_on_apply() {
        let mut form = FilterForm::from_filters(&FilterState {
            max_weight: Some(80.0),
            ..FilterState::default()
        });
        while form.field() != FilterField::MinHeight {
            form.select_next();
        }
        for c in "17x5".chars() {
            form.push_char(c);
        }
        form.select_next();
        form.push_char('.');

        let filters = form.to_filters();
        assert_eq!(filters.min_height, Some(175.0));
        assert_eq!(filters.max_height, None);
        assert_eq!(filters.max_weight, Some(80.0));
    }
}
