//! One module per resource; each exposes a clap action enum and `run`.

pub mod auth;
pub mod calendar;
pub mod category;
pub mod config;
pub mod dashboard;
pub mod event;
pub mod focus;
pub mod notify;
pub mod profile;
pub mod task;
pub mod timeline;

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use focusflow_core::guard::{Access, RouteGuard};
use focusflow_core::storage::{Config, TokenStore};
use focusflow_core::{ApiClient, ApiError, CoreError};
use serde::Serialize;

use crate::feedback::CliFeedback;

pub type CmdResult = Result<(), Box<dyn Error>>;

/// No token is stored; protected commands refuse to run.
#[derive(Debug)]
pub struct LoginRequired;

impl fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not logged in")
    }
}

impl Error for LoginRequired {}

/// Whether the failure should send the user back to `auth login`.
pub fn needs_login(err: &(dyn Error + 'static)) -> bool {
    err.is::<LoginRequired>()
        || err.downcast_ref::<ApiError>() == Some(&ApiError::Unauthorized)
        || err.downcast_ref::<CoreError>().is_some_and(CoreError::is_unauthorized)
}

/// Loaded config plus a client, without the login check.
pub fn open_client() -> Result<(Config, ApiClient), Box<dyn Error>> {
    let config = Config::load()?;
    let tokens = TokenStore::from_config(&config)?;
    let client = ApiClient::from_config(&config, tokens, Arc::new(CliFeedback))?;
    Ok((config, client))
}

/// Like [`open_client`] but requires a stored token first.
pub fn guarded_client() -> Result<(Config, ApiClient), Box<dyn Error>> {
    let (config, client) = open_client()?;
    match RouteGuard::check(client.tokens())? {
        Access::Granted(_) => Ok((config, client)),
        Access::Redirect(_) => Err(LoginRequired.into()),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Accepts RFC 3339, or a local `YYYY-MM-DD HH:MM` / `YYYY-MM-DDTHH:MM`.
pub fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| {
            format!("invalid date-time '{raw}' (expected RFC 3339 or 'YYYY-MM-DD HH:MM')")
        })?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("'{raw}' does not exist in the local time zone"))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("invalid date '{raw}': {e}"))
}

/// Reference point for calendar commands: noon of `date`, else now.
pub fn reference_for(date: Option<NaiveDate>) -> NaiveDateTime {
    match date.and_then(|d| d.and_hms_opt(12, 0, 0)) {
        Some(reference) => reference,
        None => Local::now().naive_local(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_and_rejects_garbage() {
        let dt = parse_datetime("2024-03-15T09:00:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-15T09:00:00+00:00");
        assert!(parse_datetime("next tuesday").is_err());
        assert!(parse_datetime("2024-03-15 09:00").is_ok());
    }

    #[test]
    fn login_errors_are_recognised() {
        let boxed: Box<dyn Error> = Box::new(ApiError::Unauthorized);
        assert!(needs_login(boxed.as_ref()));
        let boxed: Box<dyn Error> = LoginRequired.into();
        assert!(needs_login(boxed.as_ref()));
        let boxed: Box<dyn Error> = Box::new(ApiError::Network("down".into()));
        assert!(!needs_login(boxed.as_ref()));
    }
}
