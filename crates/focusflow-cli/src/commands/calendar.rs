//! Offline calendar window calculation.

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use focusflow_core::calendar::{view_range, CalendarCursor, Navigate, ViewMode};
use serde_json::json;

use super::{parse_date, print_json, reference_for, CmdResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum Step {
    Prev,
    Next,
    Today,
}

impl From<Step> for Navigate {
    fn from(step: Step) -> Self {
        match step {
            Step::Prev => Navigate::Prev,
            Step::Next => Navigate::Next,
            Step::Today => Navigate::Today,
        }
    }
}

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Print the fetch window for a view
    Range {
        /// day, week, month or agenda (defaults to calendar.default_view)
        #[arg(long)]
        view: Option<ViewMode>,
        /// Reference date, YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Step the reference one period before computing the window
        #[arg(long, value_enum)]
        step: Option<Step>,
    },
}

pub fn run(action: CalendarAction) -> CmdResult {
    match action {
        CalendarAction::Range { view, date, step } => {
            let view = view
                .unwrap_or_else(|| focusflow_core::Config::load_or_default().calendar.default_view);
            let mut cursor = CalendarCursor::new(reference_for(date), view);
            if let Some(step) = step {
                cursor.navigate(step.into(), reference_for(None));
            }
            let range = view_range(cursor.reference(), cursor.view());
            print_json(&json!({
                "view": cursor.view(),
                "reference": cursor.reference().date().to_string(),
                "start": range.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
                "end": range.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
            }))?;
        }
    }
    Ok(())
}
