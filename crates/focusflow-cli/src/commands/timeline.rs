//! Timeline views: calendar window, now/next, single day grid.

use chrono::{Local, NaiveDate, Utc};
use clap::Subcommand;
use focusflow_core::calendar::{view_range, CalendarCursor, ViewMode};
use focusflow_core::timeline::{compose, CalendarEntry, DayGrid};
use focusflow_core::TimelineQuery;

use super::{guarded_client, parse_date, print_json, reference_for, CmdResult};

#[derive(Subcommand)]
pub enum TimelineAction {
    /// Items in a calendar window
    Show {
        /// day, week, month or agenda (defaults to calendar.default_view)
        #[arg(long)]
        view: Option<ViewMode>,
        /// Reference date, YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Print composed entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// What is on now and what comes next
    Now {
        #[arg(long)]
        json: bool,
    },
    /// Hour grid for one day
    Day {
        /// YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
}

fn entry_line(entry: &CalendarEntry) -> String {
    let start = entry.start.with_timezone(&Local);
    let end = entry.end.with_timezone(&Local);
    let mark = if entry.is_completed { " (done)" } else { "" };
    format!(
        "{} {}-{}  [{}] {}{}",
        start.format("%a %Y-%m-%d"),
        start.format("%H:%M"),
        end.format("%H:%M"),
        entry.kind,
        entry.title,
        mark
    )
}

pub async fn run(action: TimelineAction) -> CmdResult {
    let (config, client) = guarded_client()?;

    match action {
        TimelineAction::Show { view, date, json } => {
            let view = view.unwrap_or(config.calendar.default_view);
            let cursor = CalendarCursor::new(reference_for(date), view);
            let range = cursor.range();
            let query = TimelineQuery::for_range(&range, &Local);
            let (items, categories) =
                tokio::try_join!(client.timeline(&query), client.list_categories())?;
            let entries = compose(&items, &categories);
            if json {
                return print_json(&entries);
            }
            println!(
                "{} view, {} .. {}",
                cursor.view(),
                range.start.format("%Y-%m-%d"),
                range.end.format("%Y-%m-%d")
            );
            if entries.is_empty() {
                println!("  nothing scheduled");
            }
            for entry in &entries {
                println!("  {}", entry_line(entry));
            }
        }
        TimelineAction::Now { json } => {
            let now_view = client.now_view().await?;
            if json {
                return print_json(&now_view);
            }
            match &now_view.current {
                Some(item) => println!("Now:  {} [{}]", item.title, item.item_type),
                None => println!("Now:  free"),
            }
            match (&now_view.next, now_view.minutes_until_next(Utc::now())) {
                (Some(item), Some(minutes)) => println!("Next: {} in {minutes} min", item.title),
                (Some(item), None) => println!("Next: {}", item.title),
                (None, _) => println!("Next: nothing planned"),
            }
        }
        TimelineAction::Day { date } => {
            let grid = DayGrid::try_from(&config.day_grid)?;
            let reference = reference_for(date);
            let range = view_range(reference, ViewMode::Day);
            let query = TimelineQuery::for_range(&range, &Local);
            let (items, categories) =
                tokio::try_join!(client.timeline(&query), client.list_categories())?;
            let entries = compose(&items, &categories);
            let placed = grid.place(&entries, reference.date(), &Local);
            let now_offset = grid.now_indicator(Utc::now(), &range, &Local);

            println!("{}", reference.date().format("%A %Y-%m-%d"));
            let px_per_hour = f64::from(grid.pixels_per_hour);
            for marker in grid.hour_markers() {
                let slot = marker.top..marker.top + px_per_hour;
                let mut line = format!("{} |", marker.label);
                if now_offset.is_some_and(|y| slot.contains(&y)) {
                    line.push_str(" --- now ---");
                }
                for block in placed.iter().filter(|b| slot.contains(&b.top)) {
                    let minutes = (block.height / px_per_hour * 60.0).round() as i64;
                    line.push_str(&format!(" [{} {}m]", block.entry.title, minutes));
                }
                println!("{line}");
            }
        }
    }
    Ok(())
}
