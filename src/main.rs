use std::io;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use futscout_terminal::athlete::{
    AthleteDetail, AthleteSummary, MatchRecord, MatchResult, initials, parse_iso_date,
    video_type_label,
};
use futscout_terminal::athlete_fetch::{AthleteApi, HttpSource};
use futscout_terminal::config::AppConfig;
use futscout_terminal::feed::spawn_provider;
use futscout_terminal::filters::{
    Position, field_marker_percent, foot_label, gender_label, position_label,
    position_short_label,
};
use futscout_terminal::pagination::{PageItem, PaginationMeta};
use futscout_terminal::router::Route;
use futscout_terminal::state::{
    AppState, Delta, FilterField, MATCHES_PER_PAGE, ProviderCommand, QUICK_POSITIONS, Screen,
    VIDEO_FEED_MAX, apply_delta, form_value_label,
};
use futscout_terminal::stats::rating_stars;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(state: AppState, cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state,
            should_quit: false,
            cmd_tx,
        }
    }

    fn dispatch(&mut self, cmd: Option<ProviderCommand>) {
        let Some(cmd) = cmd else {
            return;
        };
        let sent = self
            .cmd_tx
            .as_ref()
            .map(|tx| tx.send(cmd).is_ok())
            .unwrap_or(false);
        if !sent {
            self.state
                .push_log("[WARN] Provider unavailable; request dropped");
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.filter_form.is_some() {
            self.on_filters_key(key);
            return;
        }
        if self.state.search_active {
            self.on_search_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('b') | KeyCode::Esc => {
                if self.state.help_overlay {
                    self.state.help_overlay = false;
                } else {
                    let cmd = self.state.back();
                    self.dispatch(cmd);
                }
            }
            KeyCode::Char('r') => {
                let cmd = self.state.reload();
                self.dispatch(cmd);
            }
            _ => match self.state.screen {
                Screen::Home => self.on_home_key(key),
                Screen::Listing => self.on_listing_key(key),
                Screen::Detail => self.on_detail_key(key),
                Screen::NotFound => self.on_not_found_key(key),
            },
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char('p')) {
            let cmd = self.state.navigate(Route::players(""));
            self.dispatch(cmd);
        }
    }

    fn on_listing_key(&mut self, key: KeyEvent) {
        let cmd = match key.code {
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.state.start_search();
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.select_next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.select_prev();
                None
            }
            KeyCode::Enter | KeyCode::Char('d') => self.state.open_selected(),
            KeyCode::Char(c @ '0'..='4') => {
                let idx = c as usize - '0' as usize;
                self.state.set_quick_position(QUICK_POSITIONS[idx])
            }
            KeyCode::Tab => self.state.cycle_quick_position(true),
            KeyCode::BackTab => self.state.cycle_quick_position(false),
            KeyCode::Char('n') | KeyCode::Right => self.state.next_page(),
            KeyCode::Char('p') | KeyCode::Left => self.state.prev_page(),
            KeyCode::Char('g') | KeyCode::Home => self.state.go_to_page(1),
            KeyCode::Char('G') | KeyCode::End => {
                let last = self
                    .state
                    .listing_meta()
                    .map(|meta| meta.total_pages())
                    .unwrap_or(1);
                self.state.go_to_page(last)
            }
            KeyCode::Char('f') => {
                self.state.open_filters();
                None
            }
            KeyCode::Char('c') => self.state.clear_filters(),
            KeyCode::Char('h') => self.state.navigate(Route::Home),
            _ => None,
        };
        self.dispatch(cmd);
    }

    fn on_detail_key(&mut self, key: KeyEvent) {
        let cmd = match key.code {
            KeyCode::Char('n') | KeyCode::Right => {
                self.state.matches_next();
                None
            }
            KeyCode::Char('p') | KeyCode::Left => {
                self.state.matches_prev();
                None
            }
            KeyCode::Char('l') => self.state.navigate(Route::players("")),
            KeyCode::Char('h') => self.state.navigate(Route::Home),
            _ => None,
        };
        self.dispatch(cmd);
    }

    fn on_not_found_key(&mut self, key: KeyEvent) {
        let cmd = match key.code {
            KeyCode::Char('l') | KeyCode::Enter => self.state.navigate(Route::players("")),
            KeyCode::Char('h') => self.state.navigate(Route::Home),
            _ => None,
        };
        self.dispatch(cmd);
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                let cmd = self.state.finish_search();
                self.dispatch(cmd);
            }
            KeyCode::Backspace => self.state.search_pop(now),
            KeyCode::Char(c) => self.state.search_push(c, now),
            _ => {}
        }
    }

    fn on_filters_key(&mut self, key: KeyEvent) {
        let cmd = match key.code {
            KeyCode::Esc => {
                self.state.close_filters();
                None
            }
            KeyCode::Enter => self.state.apply_filters_form(),
            KeyCode::Char('x') => self.state.clear_filters(),
            _ => {
                if let Some(form) = self.state.filter_form.as_mut() {
                    match key.code {
                        KeyCode::Up | KeyCode::BackTab => form.select_prev(),
                        KeyCode::Down | KeyCode::Tab => form.select_next(),
                        KeyCode::Left => form.cycle(false),
                        KeyCode::Right | KeyCode::Char(' ') => form.cycle(true),
                        KeyCode::Backspace => form.pop_char(),
                        KeyCode::Char(c) => form.push_char(c),
                        _ => {}
                    }
                }
                None
            }
        };
        self.dispatch(cmd);
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = AppConfig::from_env();

    let start_arg = std::env::args().nth(1);
    let start = start_arg
        .as_deref()
        .and_then(Route::parse)
        .unwrap_or(Route::Home);
    let mut state = AppState::new(start, config.search_debounce);
    state.push_log(format!("[INFO] API {}", config.api_base_url));
    if let Some(raw) = start_arg.as_deref()
        && Route::parse(raw).is_none()
    {
        state.push_log(format!("[WARN] Unknown route '{raw}', starting at home"));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let api = Arc::new(
        AthleteApi::new(&config.api_base_url, HttpSource::new(config.cache_ttl))
            .with_default_limit(config.page_limit),
    );
    spawn_provider(tx, cmd_rx, api, config.fetch_threads);

    let mut app = App::new(state, Some(cmd_tx));
    let initial = app.state.reload();
    app.dispatch(initial);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            let follow_up = apply_delta(&mut app.state, delta);
            app.dispatch(follow_up);
        }

        let fired = app.state.tick(Instant::now());
        app.dispatch(fired);

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Home => render_home(frame, chunks[1]),
        Screen::Listing => render_listing(frame, chunks[1], &app.state),
        Screen::Detail => render_detail(frame, chunks[1], &app.state),
        Screen::NotFound => render_not_found(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::TOP))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.filter_form.is_some() {
        render_filters_modal(frame, frame.size(), &app.state);
    }
    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match state.screen {
        Screen::Home => "FUTSCOUT".to_string(),
        Screen::Listing => format!("FUTSCOUT PLAYERS | {}", state.location.href()),
        Screen::Detail | Screen::NotFound => format!(
            "FUTSCOUT PLAYER | {}",
            state.detail_identifier.as_deref().unwrap_or("-")
        ),
    };
    let line1 = format!("  .-.  {title}");
    let line2 = " (   )".to_string();
    let line3 = "  '-'".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if state.filter_form.is_some() {
        return "↑/↓ Field | ←/→ Change | 0-9 Type | Enter Apply | x Clear all | Esc Cancel"
            .to_string();
    }
    if state.search_active {
        return "Type to search | Backspace Delete | Enter/Esc Done".to_string();
    }
    match state.screen {
        Screen::Home => "Enter/p Players | ? Help | q Quit".to_string(),
        Screen::Listing => {
            "/ Search | 0-4 Position | f Filters | c Clear | j/k Move | Enter Open | ←/→ Page | r Reload | b Back | q Quit".to_string()
        }
        Screen::Detail => {
            "←/→ Matches | l Players | h Home | r Reload | b/Esc Back | ? Help | q Quit".to_string()
        }
        Screen::NotFound => "l Players | h Home | b/Esc Back | q Quit".to_string(),
    }
}

fn render_home(frame: &mut Frame, area: Rect) {
    let text = [
        "",
        "  Turn your talent into opportunities",
        "",
        "  Build a professional profile, share clips of your best plays and get",
        "  discovered by clubs and scouts.",
        "",
        "    • Videos & highlights        • Complete statistics",
        "    • Full visibility            • Professional profile",
        "",
        "  Press Enter to browse players.",
    ]
    .join("\n");
    let home = Paragraph::new(text).style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(home, area);
}

fn render_listing(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);

    render_listing_controls(frame, rows[0], state);

    let body = Block::default().borders(Borders::ALL).title("Players");
    let inner = body.inner(rows[1]);
    frame.render_widget(body, rows[1]);

    if state.listing_loading && state.listing.is_none() {
        frame.render_widget(Paragraph::new("Loading athletes..."), inner);
    } else if let Some(err) = state.listing_error.as_deref() {
        let text = format!("{err}. Press r to retry.");
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::Red)),
            inner,
        );
    } else if state.listing_athletes().is_empty() {
        let text = if state.active_filter_count() > 0 {
            "No athletes found. Try adjusting the filters (c clears them)."
        } else {
            "No athletes found."
        };
        frame.render_widget(Paragraph::new(text), inner);
    } else {
        render_athlete_rows(frame, inner, state);
    }

    let pager = Paragraph::new(state.listing_meta().map(pagination_text).unwrap_or_default())
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(pager, rows[2]);
}

fn render_listing_controls(frame: &mut Frame, area: Rect, state: &AppState) {
    let search_style = if state.search_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let cursor = if state.search_active { "▏" } else { "" };
    let search = Line::from(vec![
        Span::raw("Search: "),
        Span::styled(format!("{}{cursor}", state.search_input), search_style),
    ]);

    let selected = state.quick_position_index();
    let mut bar = vec![Span::raw("Position: ")];
    for (idx, position) in QUICK_POSITIONS.iter().enumerate() {
        let label = position.map(position_short_label).unwrap_or("All");
        let style = if idx == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        bar.push(Span::styled(format!(" {idx}:{label} "), style));
    }
    let active = state.active_filter_count();
    bar.push(Span::raw("   "));
    bar.push(if active > 0 {
        Span::styled(
            format!("[f] Filters ({active})"),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::raw("[f] Filters")
    });

    let loading = if state.listing_loading {
        Line::from(Span::styled("Updating...", Style::default().fg(Color::DarkGray)))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(vec![search, Line::from(bar), loading]), area);
}

fn render_athlete_rows(frame: &mut Frame, area: Rect, state: &AppState) {
    let athletes = state.listing_athletes();
    let (start, end) = visible_range(state.selected, athletes.len(), area.height as usize);
    for (row, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: area.x,
            y: area.y + row as u16,
            width: area.width,
            height: 1,
        };
        let style = if idx == state.selected {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        render_cell_text(frame, row_area, &athlete_row_text(&athletes[idx]), style);
    }
}

fn athlete_row_text(athlete: &AthleteSummary) -> String {
    let nickname = athlete
        .nickname
        .as_deref()
        .map(|n| format!("@{n}"))
        .unwrap_or_default();
    let position = athlete
        .primary_position
        .map(position_label)
        .unwrap_or("-");
    format!(
        "{:<24} {:<16} {:<11} {:>6} {:>6} {:<12} {:<18} ♥ {}",
        truncate(athlete.display_name(), 24),
        truncate(&nickname, 16),
        position,
        measure(athlete.height, "cm"),
        measure(athlete.weight, "kg"),
        foot_label(athlete.dominant_foot),
        truncate(athlete.current_club.as_deref().unwrap_or("-"), 18),
        athlete.favorites
    )
}

fn pagination_text(meta: PaginationMeta) -> String {
    let summary = format!(
        "Page {} of {} ({} players)",
        meta.current_page(),
        meta.total_pages().max(1),
        meta.total
    );
    if !meta.shows_controls() {
        return summary;
    }
    let prev = if meta.has_prev() { "‹ Prev" } else { "     " };
    let next = if meta.has_next() { "Next ›" } else { "" };
    let window = meta
        .window()
        .into_iter()
        .map(|item| match item {
            PageItem::Page(page) if page == meta.current_page() => format!("[{page}]"),
            PageItem::Page(page) => page.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("{summary}    {prev}  {window}  {next}")
}

fn render_filters_modal(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(form) = state.filter_form.as_ref() else {
        return;
    };
    let popup_area = centered_rect(50, 60, area);
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![Line::from(""), Line::from("  Refine the player search")];
    lines.push(Line::from(""));
    for (idx, field) in FilterField::ALL.iter().enumerate() {
        let selected = idx == form.selected;
        let marker = if selected { "›" } else { " " };
        let value = form_value_label(form, *field);
        let value = if field.is_numeric() && value.is_empty() {
            "any".to_string()
        } else {
            value
        };
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(" {marker} {:<18} {value}", field.label()),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("  Enter Apply | x Clear all | Esc Cancel"));

    let modal = Paragraph::new(lines)
        .block(Block::default().title("Advanced filters").borders(Borders::ALL));
    frame.render_widget(modal, popup_area);
}

fn render_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(detail) = state.detail.as_ref() else {
        let text = if state.detail_loading {
            "Loading athlete..."
        } else {
            "No athlete loaded. Press r to retry."
        };
        frame.render_widget(Paragraph::new(text), area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let profile = Paragraph::new(profile_text(detail))
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Profile").borders(Borders::ALL));
    frame.render_widget(profile, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(6),
            Constraint::Length(10),
        ])
        .split(columns[1]);

    let stats = Paragraph::new(stats_text(state))
        .block(Block::default().title("Match statistics").borders(Borders::ALL));
    frame.render_widget(stats, right[0]);

    let matches = Paragraph::new(matches_text(state))
        .block(Block::default().title("Recent matches").borders(Borders::ALL));
    frame.render_widget(matches, right[1]);

    let videos = Paragraph::new(videos_text(detail))
        .block(Block::default().title("Videos").borders(Borders::ALL));
    frame.render_widget(videos, right[2]);
}

fn profile_text(detail: &AthleteDetail) -> String {
    let summary = &detail.summary;
    let name = summary.display_name();
    let mut lines = vec![format!("({}) {name}", initials(name))];
    if let Some(nickname) = summary.nickname.as_deref() {
        lines.push(format!("@{nickname}"));
    }

    let mut tags = Vec::new();
    if let Some(position) = summary.primary_position {
        tags.push(position_label(position).to_string());
    }
    if let Some(position) = summary.secondary_position {
        tags.push(format!("also {}", position_label(position)));
    }
    if let Some(gender) = summary.gender {
        tags.push(gender_label(gender).to_string());
    }
    if summary.has_manager {
        tags.push("Has manager".to_string());
    }
    if !tags.is_empty() {
        lines.push(tags.join(" · "));
    }
    if let Some(club) = summary.current_club.as_deref() {
        lines.push(format!("Club: {club}"));
    }
    if let Some(address) = detail.address.as_ref() {
        let place = [&address.city, &address.state, &address.country]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if !place.is_empty() {
            lines.push(format!("From: {place}"));
        }
    }
    lines.push(format!("♥ {} favorites", summary.favorites));
    for (label, url) in [
        ("Instagram", detail.instagram_url.as_deref()),
        ("Twitter", detail.twitter_url.as_deref()),
        ("YouTube", detail.youtube_url.as_deref()),
    ] {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            lines.push(format!("{label}: {url}"));
        }
    }

    if let Some(bio) = detail.biography.as_deref().filter(|b| !b.trim().is_empty()) {
        lines.push(String::new());
        lines.push(bio.trim().to_string());
    }

    lines.push(String::new());
    let age = detail
        .age_on(Local::now().date_naive())
        .map(|age| format!("{age} years"))
        .unwrap_or_else(|| "-".to_string());
    lines.push(format!(
        "Height {}  Weight {}  Age {age}",
        measure(summary.height, "cm"),
        measure(summary.weight, "kg"),
    ));
    lines.push(format!("Foot: {}", foot_label(summary.dominant_foot)));

    lines.push(String::new());
    lines.push("Field position".to_string());
    lines.push(field_marker_line(summary.primary_position, 36));
    lines.join("\n")
}

/// A one-line pitch with the athlete's short position label placed on it.
fn field_marker_line(position: Option<Position>, width: usize) -> String {
    let mut cells = vec!['-'; width];
    cells[width / 2] = '|';
    let label: Vec<char> = position
        .map(position_short_label)
        .unwrap_or("?")
        .chars()
        .collect();
    let center = field_marker_percent(position) as usize * width / 100;
    let start = center
        .saturating_sub(label.len() / 2)
        .min(width - label.len());
    cells[start..start + label.len()].copy_from_slice(&label);
    format!("[{}]", cells.into_iter().collect::<String>())
}

fn stats_text(state: &AppState) -> String {
    let Some(stats) = state.detail_stats else {
        return "No statistics".to_string();
    };
    let mut lines = vec![
        format!(
            "W {}   D {}   L {}",
            stats.wins, stats.draws, stats.losses
        ),
        format!("Matches: {}", stats.total_matches),
        format!("Win rate: {}%", stats.win_rate()),
    ];
    if let Some(rating) = stats.average_rating {
        lines.push(format!("Avg rating: {rating:.1} {}", rating_stars(rating)));
    }
    lines.join("\n")
}

fn matches_text(state: &AppState) -> String {
    if state.detail_matches.is_empty() {
        return "No matches recorded".to_string();
    }
    let mut lines = state
        .visible_matches()
        .iter()
        .map(match_line)
        .collect::<Vec<_>>();
    let total_pages = state.matches_total_pages();
    if total_pages > 1 {
        lines.push(String::new());
        lines.push(format!(
            "{} of {} · {MATCHES_PER_PAGE} per page · ←/→",
            state.matches_page, total_pages
        ));
    }
    lines.join("\n")
}

fn match_line(record: &MatchRecord) -> String {
    let mine = record
        .my_team
        .as_ref()
        .map(|team| {
            if team.acronym.trim().is_empty() {
                team.name.clone()
            } else {
                team.acronym.clone()
            }
        })
        .unwrap_or_else(|| "-".to_string());
    let score = match (record.my_team_score, record.adversary_score) {
        (Some(mine), Some(theirs)) => format!("{mine}-{theirs}"),
        _ => "vs".to_string(),
    };
    let rating = record
        .performance_rating
        .map(rating_stars)
        .unwrap_or_default();
    let friendly = if record.is_friendly { " (friendly)" } else { "" };
    format!(
        "{} {} {score} {} {}{friendly} {rating}",
        record.short_date(),
        mine,
        record.adversary_team,
        result_label(record.result)
    )
}

fn result_label(result: MatchResult) -> &'static str {
    match result {
        MatchResult::Win => "W",
        MatchResult::Draw => "D",
        MatchResult::Loss => "L",
        MatchResult::NotFinished => "-",
    }
}

fn videos_text(detail: &AthleteDetail) -> String {
    if detail.video_feed.is_empty() {
        return "No videos yet".to_string();
    }
    detail
        .video_feed
        .iter()
        .take(VIDEO_FEED_MAX)
        .map(|video| {
            let when = video
                .created_at
                .as_deref()
                .and_then(parse_iso_date)
                .map(|date| date.format("%d/%m/%Y").to_string())
                .unwrap_or_default();
            format!("{:<15} {when}", video_type_label(&video.kind))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_not_found(frame: &mut Frame, area: Rect, state: &AppState) {
    let identifier = state.detail_identifier.as_deref().unwrap_or("-");
    let text = [
        String::new(),
        "  Player not found".to_string(),
        String::new(),
        format!("  No athlete matches '{identifier}'. It may have been removed or the link is wrong."),
        String::new(),
        "  l  Browse players".to_string(),
        "  h  Home".to_string(),
    ]
    .join("\n");
    frame.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn measure(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}{unit}"),
        Some(v) => format!("{v:.1}{unit}"),
        None => "-".to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out = text.chars().take(max.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let skip = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Futscout Terminal - Help",
        "",
        "Global:",
        "  b / Esc      Back",
        "  r            Reload current view",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Players:",
        "  / or s       Search by nickname",
        "  0-4 / Tab    Quick position filter",
        "  f            Advanced filters",
        "  c            Clear filters",
        "  j/k or ↑/↓   Move",
        "  Enter        Open player",
        "  ←/→ g/G      Previous/next, first/last page",
        "",
        "Player:",
        "  ←/→          Recent matches pages",
        "  l / h        Players / home",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
