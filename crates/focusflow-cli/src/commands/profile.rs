//! Current user profile.

use clap::Subcommand;
use focusflow_core::models::UserUpdate;

use super::{guarded_client, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the logged-in user
    Show,
    /// Change the country used for public holidays
    SetCountry {
        /// ISO 3166-1 alpha-2 code, e.g. "DE"
        code: String,
    },
}

pub async fn run(action: ProfileAction) -> CmdResult {
    let (_, client) = guarded_client()?;

    match action {
        ProfileAction::Show => print_json(&client.me().await?)?,
        ProfileAction::SetCountry { code } => {
            let code = code.trim().to_ascii_uppercase();
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(format!("invalid country code '{code}'").into());
            }
            let user = client
                .update_me(&UserUpdate { country: Some(code) })
                .await?;
            print_json(&user)?;
        }
    }
    Ok(())
}
