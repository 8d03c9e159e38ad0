//! `/timeline` endpoints.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Method;

use super::ApiClient;
use crate::calendar::ViewRange;
use crate::error::ApiError;
use crate::timeline::{NowView, TimelineItem};

/// Query window for `GET /timeline/`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineQuery {
    /// Backend defaults to today 00:00 when absent
    pub start: Option<DateTime<Utc>>,
    /// Backend defaults to the end of `start`'s day when absent
    pub end: Option<DateTime<Utc>>,
    pub skip: u32,
    pub limit: u32,
}

impl Default for TimelineQuery {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            skip: 0,
            limit: 1000,
        }
    }
}

impl TimelineQuery {
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    /// Query covering a local calendar window.
    pub fn for_range<Tz: chrono::TimeZone>(range: &ViewRange, tz: &Tz) -> Self {
        let (start, end) = range.to_utc(tz);
        Self::between(start, end)
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(start) = self.start {
            params.push(("start", start.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        if let Some(end) = self.end {
            params.push(("end", end.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        params
    }
}

impl ApiClient {
    /// Tasks, events and holidays merged and sorted by the backend.
    pub async fn timeline(&self, query: &TimelineQuery) -> Result<Vec<TimelineItem>, ApiError> {
        let req = self
            .request(Method::GET, "/timeline/")?
            .query(&query.params());
        self.send_json(req).await
    }

    /// What is happening now and what comes next.
    pub async fn now_view(&self) -> Result<NowView, ApiError> {
        let req = self.request(Method::GET, "/timeline/now")?;
        self.send_json(req).await
    }
}
