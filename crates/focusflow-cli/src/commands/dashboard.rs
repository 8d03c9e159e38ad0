//! Dashboard summary and widget arrangement.

use chrono::{Local, NaiveDate, Utc};
use clap::Subcommand;
use focusflow_core::calendar::{CalendarCursor, ViewMode};
use focusflow_core::dashboard::{Dashboard, Widget, WidgetId, WidgetLayout};
use focusflow_core::storage::LocalStore;
use serde_json::json;

use super::{guarded_client, parse_date, print_json, reference_for, CmdResult};

#[derive(Subcommand)]
pub enum DashboardAction {
    /// Render widgets in the saved order
    Show {
        /// Calendar view for the events widget window
        #[arg(long)]
        view: Option<ViewMode>,
        /// Reference date, YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// Print the widget order
    Widgets,
    /// Move a widget to a new position (0-based)
    Move {
        /// tasks, events or categories
        widget: WidgetId,
        /// Target position
        to: usize,
    },
    /// Restore the default order
    Reset,
}

fn render(widget: &Widget<'_>) {
    match widget {
        Widget::Tasks(tasks) => {
            println!("Tasks");
            if tasks.is_empty() {
                println!("  no tasks");
            }
            for task in tasks.iter() {
                let mark = if task.is_completed { "x" } else { " " };
                println!("  [{mark}] {} ({})", task.title, task.energy_required);
            }
        }
        Widget::Events(events) => {
            println!("Upcoming events");
            if events.is_empty() {
                println!("  nothing upcoming");
            }
            for event in events {
                let start = event.start.with_timezone(&Local);
                println!("  {}  {}", start.format("%a %d %b %H:%M"), event.title);
            }
        }
        Widget::Categories(categories) => {
            println!("Categories");
            let chips: Vec<String> = categories
                .iter()
                .map(|c| format!("{} {}", c.color_hex, c.name))
                .collect();
            if chips.is_empty() {
                println!("  none");
            } else {
                println!("  {}", chips.join("  |  "));
            }
        }
    }
}

pub async fn run(action: DashboardAction) -> CmdResult {
    let (config, client) = guarded_client()?;
    let store = LocalStore::open()?;
    let mut layout = WidgetLayout::load(&store);

    match action {
        DashboardAction::Show { view, date, json } => {
            let view = view.unwrap_or(config.calendar.default_view);
            let cursor = CalendarCursor::new(reference_for(date), view);
            let dashboard = Dashboard::load(&client, &cursor, &Local).await?;
            let widgets = dashboard.widgets(&layout, Utc::now());
            if json {
                return print_json(&widgets);
            }
            for (i, widget) in widgets.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                render(widget);
            }
        }
        DashboardAction::Widgets => print_json(&json!({ "order": layout.order() }))?,
        DashboardAction::Move { widget, to } => {
            let from = layout
                .position(widget)
                .ok_or_else(|| format!("widget '{widget}' is not in the layout"))?;
            layout.move_widget(from, to)?;
            layout.save(&store)?;
            print_json(&json!({ "order": layout.order() }))?;
        }
        DashboardAction::Reset => {
            layout = WidgetLayout::default();
            layout.save(&store)?;
            print_json(&json!({ "order": layout.order() }))?;
        }
    }
    Ok(())
}
