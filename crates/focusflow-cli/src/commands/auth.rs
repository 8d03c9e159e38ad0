//! Account session commands.

use clap::Subcommand;
use focusflow_core::notify::Notice;
use serde_json::json;

use super::{open_client, print_json, CmdResult};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in and store the access token
    Login {
        /// Account email
        email: String,
        /// Password (falls back to FOCUSFLOW_PASSWORD)
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        /// Account email
        email: String,
        /// Password (falls back to FOCUSFLOW_PASSWORD)
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored access token
    Logout,
    /// Show whether a token is stored
    Status,
}

fn password_or_env(password: Option<String>) -> Result<String, String> {
    password
        .or_else(|| std::env::var("FOCUSFLOW_PASSWORD").ok())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| "password required: pass --password or set FOCUSFLOW_PASSWORD".to_string())
}

pub async fn run(action: AuthAction) -> CmdResult {
    let (config, client) = open_client()?;

    match action {
        AuthAction::Login { email, password } => {
            let password = password_or_env(password)?;
            let response = client.login(&email, &password).await?;
            client
                .feedback()
                .notify(Notice::success(format!("Logged in as {email}")));
            print_json(&json!({ "token_type": response.token_type }))?;
        }
        AuthAction::Register { email, password } => {
            let password = password_or_env(password)?;
            let user = client.register(&email, &password).await?;
            client.feedback().notify(Notice::success(format!(
                "Account created. Log in with `focusflow auth login {email}`."
            )));
            print_json(&user)?;
        }
        AuthAction::Logout => {
            client.logout()?;
            println!("logged out");
        }
        AuthAction::Status => {
            print_json(&json!({
                "logged_in": client.tokens().is_present(),
                "base_url": client.base_url().as_str(),
                "token_backend": config.auth.token_backend,
            }))?;
        }
    }
    Ok(())
}
