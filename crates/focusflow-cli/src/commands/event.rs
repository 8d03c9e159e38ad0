//! Event management commands.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use focusflow_core::models::{EventDraft, EventPatch};

use super::{guarded_client, parse_datetime, print_json, CmdResult};

#[derive(Subcommand)]
pub enum EventAction {
    /// List events
    List,
    /// Get event details
    Get {
        /// Event ID
        id: i64,
    },
    /// Create an event
    Create {
        /// Event title
        title: String,
        /// Start (RFC 3339 or "YYYY-MM-DD HH:MM" local)
        #[arg(long, value_parser = parse_datetime)]
        start: DateTime<Utc>,
        /// End
        #[arg(long, value_parser = parse_datetime)]
        end: DateTime<Utc>,
        /// Category ID
        #[arg(long)]
        category: i64,
        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },
    /// Update an event
    Update {
        /// Event ID
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_parser = parse_datetime)]
        start: Option<DateTime<Utc>>,
        #[arg(long, value_parser = parse_datetime)]
        end: Option<DateTime<Utc>>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an event
    Delete {
        /// Event ID
        id: i64,
    },
}

pub async fn run(action: EventAction) -> CmdResult {
    let (_, client) = guarded_client()?;

    match action {
        EventAction::List => print_json(&client.list_events().await?)?,
        EventAction::Get { id } => print_json(&client.get_event(id).await?)?,
        EventAction::Create {
            title,
            start,
            end,
            category,
            description,
        } => {
            let draft = EventDraft {
                title,
                description,
                start_time: start,
                end_time: end,
                category_id: category,
            };
            draft.validate()?;
            let event = client.create_event(&draft).await?;
            eprintln!("Event created: {}", event.id);
            print_json(&event)?;
        }
        EventAction::Update {
            id,
            title,
            start,
            end,
            category,
            description,
        } => {
            if let (Some(s), Some(e)) = (start, end) {
                if e <= s {
                    return Err(format!("end ({e}) must be after start ({s})").into());
                }
            }
            let patch = EventPatch {
                title,
                description,
                start_time: start,
                end_time: end,
                category_id: category,
            };
            print_json(&client.update_event(id, &patch).await?)?;
        }
        EventAction::Delete { id } => {
            client.delete_event(id).await?;
            println!("Event deleted: {id}");
        }
    }
    Ok(())
}
