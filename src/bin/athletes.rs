use anyhow::{Context, Result};
use chrono::Local;

use futscout_terminal::athlete::{AthleteListPage, MatchResult};
use futscout_terminal::athlete_fetch::{AthleteApi, DetailOutcome, HttpSource};
use futscout_terminal::config::AppConfig;
use futscout_terminal::filters::{foot_label, position_label};
use futscout_terminal::pagination::PageItem;
use futscout_terminal::query;
use futscout_terminal::router::Route;
use futscout_terminal::stats::DerivedStats;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = AppConfig::from_env();

    let raw = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/players".to_string());
    let route = Route::parse(&raw).with_context(|| format!("unrecognised route '{raw}'"))?;

    let api = AthleteApi::new(&config.api_base_url, HttpSource::new(config.cache_ttl))
        .with_default_limit(config.page_limit);

    match route {
        Route::Home => {
            println!("Routes: /players?<filters>  /players/<nickname|uuid>");
        }
        Route::Players { query: raw_query } => {
            let filters = query::deserialize(&raw_query);
            eprintln!("GET {}", api.listing_url(&filters));
            let page = api.fetch_athletes(&filters)?;
            print_listing(&page);
        }
        Route::Player { identifier } => match api.fetch_athlete_by_identifier(&identifier) {
            DetailOutcome::Found(athlete) => {
                let summary = &athlete.summary;
                println!("{} (@{})", summary.display_name(), summary.route_identifier());
                println!(
                    "  {} | {} | club: {}",
                    summary
                        .primary_position
                        .map(position_label)
                        .unwrap_or("-"),
                    foot_label(summary.dominant_foot),
                    summary.current_club.as_deref().unwrap_or("-")
                );
                if let Some(age) = athlete.age_on(Local::now().date_naive()) {
                    println!("  age: {age}");
                }

                let matches = athlete.all_matches();
                let stats = DerivedStats::compute(&matches);
                println!(
                    "  matches: {} (W {} D {} L {}) win rate {}%",
                    stats.total_matches,
                    stats.wins,
                    stats.draws,
                    stats.losses,
                    stats.win_rate()
                );
                if let Some(rating) = stats.average_rating {
                    println!("  average rating: {rating:.1}");
                }
                for record in matches.iter().take(10) {
                    let result = match record.result {
                        MatchResult::Win => "W",
                        MatchResult::Draw => "D",
                        MatchResult::Loss => "L",
                        MatchResult::NotFinished => "-",
                    };
                    println!(
                        "    {} vs {} {}",
                        record.short_date(),
                        record.adversary_team,
                        result
                    );
                }
            }
            DetailOutcome::NotFound { reason } => {
                eprintln!("athlete '{identifier}' not found: {reason}");
                std::process::exit(1);
            }
        },
    }
    Ok(())
}

fn print_listing(page: &AthleteListPage) {
    for athlete in &page.athletes {
        println!(
            "{:<28} @{:<18} {}",
            athlete.display_name(),
            athlete.nickname.as_deref().unwrap_or("-"),
            athlete
                .primary_position
                .map(position_label)
                .unwrap_or("-")
        );
    }
    let meta = page.pagination;
    let window = meta
        .window()
        .into_iter()
        .map(|item| match item {
            PageItem::Page(n) if n == meta.current_page() => format!("[{n}]"),
            PageItem::Page(n) => n.to_string(),
            PageItem::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "Page {} of {} ({} players)  {window}",
        meta.current_page(),
        meta.total_pages().max(1),
        meta.total
    );
}
