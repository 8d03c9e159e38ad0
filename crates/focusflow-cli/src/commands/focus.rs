//! Focus session commands.

use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use focusflow_core::focus::{FocusAction as Transition, FocusStatus, FocusTimer};
use focusflow_core::{ApiClient, StopOptions};
use tracing::debug;

use super::{guarded_client, print_json, CmdResult};

/// Server refresh cadence of `focus watch`, in ticks.
const REFRESH_EVERY: u32 = 15;

#[derive(Subcommand)]
pub enum FocusAction {
    /// Start a focus session
    Start {
        /// Task to focus on
        #[arg(long)]
        task: Option<i64>,
    },
    /// Show the running session
    Current,
    /// End a session
    Stop {
        /// Session ID (defaults to the current session)
        id: Option<i64>,
        /// How it went, 1-5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        score: Option<u8>,
        /// Also mark the linked task completed
        #[arg(long)]
        complete_task: bool,
    },
    /// Pause a session
    Pause {
        /// Session ID (defaults to the current session)
        id: Option<i64>,
    },
    /// Resume a paused session
    Resume {
        /// Session ID (defaults to the current session)
        id: Option<i64>,
    },
    /// Record an interruption
    Interrupt {
        /// Session ID (defaults to the current session)
        id: Option<i64>,
        /// What interrupted you
        #[arg(long)]
        note: Option<String>,
    },
    /// Focus statistics
    Stats,
    /// Live elapsed-time display until the session ends or Ctrl-C
    Watch,
}

/// Resolve an explicit id, else the current session's, checking that the
/// session's status allows the transition.
async fn target_session(
    client: &ApiClient,
    id: Option<i64>,
    transition: Transition,
) -> Result<i64, Box<dyn std::error::Error>> {
    if let Some(id) = id {
        return Ok(id);
    }
    let session = client
        .current_focus()
        .await?
        .ok_or("no focus session is running")?;
    if !session.status.allows(transition) {
        return Err(format!(
            "session {} is {}; cannot {transition:?}",
            session.id,
            session.status.as_str()
        )
        .into());
    }
    Ok(session.id)
}

pub async fn run(action: FocusAction) -> CmdResult {
    let (config, client) = guarded_client()?;

    match action {
        FocusAction::Start { task } => {
            let session = client.start_focus(task).await?;
            eprintln!("Focus session started: {}", session.id);
            print_json(&session)?;
        }
        FocusAction::Current => match client.current_focus().await? {
            Some(session) => {
                let mut timer = FocusTimer::new(session);
                timer.tick(Utc::now());
                print_json(&timer.snapshot())?;
            }
            None => println!("no focus session is running"),
        },
        FocusAction::Stop {
            id,
            score,
            complete_task,
        } => {
            let id = target_session(&client, id, Transition::Stop).await?;
            let options = StopOptions {
                feedback_score: score,
                complete_task,
            };
            print_json(&client.stop_focus(id, options).await?)?;
        }
        FocusAction::Pause { id } => {
            let id = target_session(&client, id, Transition::Pause).await?;
            print_json(&client.pause_focus(id).await?)?;
        }
        FocusAction::Resume { id } => {
            let id = target_session(&client, id, Transition::Resume).await?;
            print_json(&client.resume_focus(id).await?)?;
        }
        FocusAction::Interrupt { id, note } => {
            let id = target_session(&client, id, Transition::Interrupt).await?;
            print_json(&client.log_interruption(id, note.as_deref()).await?)?;
        }
        FocusAction::Stats => print_json(&client.focus_stats().await?)?,
        FocusAction::Watch => {
            let session = client
                .current_focus()
                .await?
                .ok_or("no focus session is running")?;
            let tick = Duration::from_millis(config.focus.tick_ms);
            watch(&client, FocusTimer::new(session), tick).await?;
        }
    }
    Ok(())
}

async fn watch(client: &ApiClient, mut timer: FocusTimer, tick: Duration) -> CmdResult {
    let mut interval = tokio::time::interval(tick);
    let mut ticks: u32 = 0;
    let mut stdout = std::io::stdout();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                debug!("watch interrupted");
                break;
            }
            _ = interval.tick() => {
                ticks = ticks.wrapping_add(1);
                if ticks % REFRESH_EVERY == 0 {
                    match client.current_focus().await? {
                        Some(session) => timer.adopt(session),
                        None => break,
                    }
                }
                timer.tick(Utc::now());
                let snapshot = timer.snapshot();
                write!(
                    stdout,
                    "\r{:<6} {:>8}  interruptions: {}",
                    snapshot.label, snapshot.display, snapshot.interruptions
                )?;
                stdout.flush()?;
                if timer.status() != FocusStatus::Active {
                    break;
                }
            }
        }
    }
    writeln!(stdout)?;
    Ok(())
}
