//! Push notification registration.

use clap::Subcommand;
use focusflow_core::models::{PushKeys, PushSubscription};

use super::{guarded_client, print_json, CmdResult};

#[derive(Subcommand)]
pub enum NotifyAction {
    /// Register a push endpoint or native device token
    Subscribe {
        /// Web push endpoint URL, or a native device token
        endpoint: String,
        /// VAPID p256dh key (web push only)
        #[arg(long, requires = "auth")]
        p256dh: Option<String>,
        /// VAPID auth secret (web push only)
        #[arg(long, requires = "p256dh")]
        auth: Option<String>,
        /// Native platform, e.g. "ios" or "android"
        #[arg(long, conflicts_with = "p256dh")]
        platform: Option<String>,
    },
}

pub async fn run(action: NotifyAction) -> CmdResult {
    let (_, client) = guarded_client()?;

    match action {
        NotifyAction::Subscribe {
            endpoint,
            p256dh,
            auth,
            platform,
        } => {
            let subscription = match (p256dh, auth) {
                (Some(p256dh), Some(auth)) => PushSubscription {
                    endpoint,
                    keys: PushKeys { p256dh, auth },
                    platform: None,
                },
                _ => PushSubscription::native(
                    endpoint,
                    platform.unwrap_or_else(|| "web".to_string()),
                ),
            };
            // Registration failures are logged by the client and never fatal.
            match client.subscribe_push(&subscription).await {
                Some(response) => print_json(&response)?,
                None => eprintln!("push registration skipped"),
            }
        }
    }
    Ok(())
}
