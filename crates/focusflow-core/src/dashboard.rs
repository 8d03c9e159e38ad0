//! Dashboard widgets and their persisted order.
//!
//! The dashboard is three widgets (tasks, upcoming events, category
//! chips) over one concurrent fetch. Their order is user-arranged and
//! stored under [`WidgetLayout::STORAGE_KEY`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::{ApiClient, TimelineQuery};
use crate::calendar::{CalendarCursor, ViewRange};
use crate::error::{ApiError, StorageError, ValidationError};
use crate::models::{remove_by_id, replace_by_id, Category, Task};
use crate::storage::KeyValueStore;
use crate::timeline::{compose, upcoming_events, CalendarEntry};

/// Tasks and events widgets show at most this many rows.
pub const WIDGET_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetId {
    Tasks,
    Events,
    Categories,
}

impl WidgetId {
    pub const ALL: [WidgetId; 3] = [WidgetId::Tasks, WidgetId::Events, WidgetId::Categories];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Events => "events",
            Self::Categories => "categories",
        }
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "widget".into(),
                message: format!("unknown widget '{s}'"),
            })
    }
}

/// Ordered widget ids. Always holds each widget exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetLayout {
    order: Vec<WidgetId>,
}

impl Default for WidgetLayout {
    fn default() -> Self {
        Self {
            order: WidgetId::ALL.to_vec(),
        }
    }
}

impl WidgetLayout {
    pub const STORAGE_KEY: &'static str = "dashboard_widget_order";

    /// Build from stored ids: unknown and repeated ids are dropped,
    /// missing ones appended in default order.
    pub fn from_ids<S: AsRef<str>>(ids: &[S]) -> Self {
        let mut order = Vec::with_capacity(WidgetId::ALL.len());
        for raw in ids {
            match raw.as_ref().parse::<WidgetId>() {
                Ok(id) if !order.contains(&id) => order.push(id),
                Ok(_) => {}
                Err(_) => debug!(widget = raw.as_ref(), "dropping unknown widget id"),
            }
        }
        for id in WidgetId::ALL {
            if !order.contains(&id) {
                order.push(id);
            }
        }
        Self { order }
    }

    /// Read the stored order, falling back to the default when the key is
    /// missing or its value is not a JSON array of strings.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!(error = %e, "could not read widget order, using default");
                return Self::default();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => Self::from_ids(&ids),
            Err(e) => {
                warn!(error = %e, "stored widget order is malformed, using default");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let ids: Vec<&str> = self.order.iter().map(WidgetId::as_str).collect();
        let json = serde_json::to_string(&ids).map_err(|e| StorageError::File {
            path: Self::STORAGE_KEY.into(),
            message: e.to_string(),
        })?;
        store.set(Self::STORAGE_KEY, &json)
    }

    pub fn order(&self) -> &[WidgetId] {
        &self.order
    }

    pub fn position(&self, id: WidgetId) -> Option<usize> {
        self.order.iter().position(|w| *w == id)
    }

    /// Take the widget at `from` out and reinsert it at `to`.
    pub fn move_widget(&mut self, from: usize, to: usize) -> Result<(), ValidationError> {
        let len = self.order.len();
        for index in [from, to] {
            if index >= len {
                return Err(ValidationError::OutOfBounds {
                    collection: "widgets".into(),
                    index,
                    len,
                });
            }
        }
        let widget = self.order.remove(from);
        self.order.insert(to, widget);
        Ok(())
    }
}

/// One rendered widget, borrowing from the loaded [`Dashboard`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", content = "items", rename_all = "lowercase")]
pub enum Widget<'a> {
    Tasks(&'a [Task]),
    Events(Vec<&'a CalendarEntry>),
    Categories(&'a [Category]),
}

/// Data behind the dashboard for the cursor's current window.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub range: ViewRange,
    pub entries: Vec<CalendarEntry>,
    pub tasks: Vec<Task>,
    pub categories: Vec<Category>,
}

impl Dashboard {
    /// Fetch timeline, tasks and categories concurrently.
    ///
    /// The first failure aborts the load; its notice has already been
    /// raised by the client.
    pub async fn load<Tz: TimeZone>(
        client: &ApiClient,
        cursor: &CalendarCursor,
        tz: &Tz,
    ) -> Result<Self, ApiError> {
        let range = cursor.range();
        let query = TimelineQuery::for_range(&range, tz);
        let (items, tasks, categories) = tokio::try_join!(
            client.timeline(&query),
            client.list_tasks(),
            client.list_categories(),
        )?;
        debug!(
            items = items.len(),
            tasks = tasks.len(),
            categories = categories.len(),
            "dashboard loaded"
        );
        let entries = compose(&items, &categories);
        Ok(Self {
            range,
            entries,
            tasks,
            categories,
        })
    }

    /// Widgets in layout order.
    pub fn widgets(&self, layout: &WidgetLayout, now: DateTime<Utc>) -> Vec<Widget<'_>> {
        layout
            .order()
            .iter()
            .map(|id| match id {
                WidgetId::Tasks => {
                    Widget::Tasks(&self.tasks[..self.tasks.len().min(WIDGET_ROWS)])
                }
                WidgetId::Events => {
                    Widget::Events(upcoming_events(&self.entries, now, WIDGET_ROWS))
                }
                WidgetId::Categories => Widget::Categories(&self.categories),
            })
            .collect()
    }

    /// Toggle completion on the server and swap in its copy.
    pub async fn toggle_task(&mut self, client: &ApiClient, id: i64) -> Result<Task, ApiError> {
        let updated = client.toggle_task(id).await?;
        if !replace_by_id(&mut self.tasks, updated.clone()) {
            debug!(id, "toggled task was not in the loaded list");
        }
        Ok(updated)
    }

    /// Delete a category on the server and drop its chip.
    pub async fn delete_category(
        &mut self,
        client: &ApiClient,
        id: i64,
    ) -> Result<Option<Category>, ApiError> {
        client.delete_category(id).await?;
        Ok(remove_by_id(&mut self.categories, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::client_for;
    use crate::calendar::ViewMode;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    #[test]
    fn missing_or_bad_order_falls_back_to_default() {
        let store = MemoryStore::new();
        assert_eq!(WidgetLayout::load(&store), WidgetLayout::default());

        store.set(WidgetLayout::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(WidgetLayout::load(&store), WidgetLayout::default());
    }

    #[test]
    fn stored_order_is_sanitized() {
        let store = MemoryStore::new();
        store
            .set(WidgetLayout::STORAGE_KEY, r#"["categories","weather","categories","tasks"]"#)
            .unwrap();
        let layout = WidgetLayout::load(&store);
        assert_eq!(layout.order(), &[WidgetId::Categories, WidgetId::Tasks, WidgetId::Events]);
    }

    #[test]
    fn move_then_save_roundtrips() {
        let store = MemoryStore::new();
        let mut layout = WidgetLayout::default();
        layout.move_widget(0, 2).unwrap();
        assert_eq!(layout.order(), &[WidgetId::Events, WidgetId::Categories, WidgetId::Tasks]);
        layout.save(&store).unwrap();

        assert_eq!(
            store.get(WidgetLayout::STORAGE_KEY).unwrap().as_deref(),
            Some(r#"["events","categories","tasks"]"#)
        );
        assert_eq!(WidgetLayout::load(&store), layout);
        assert!(layout.move_widget(3, 0).is_err());
    }

    fn cursor() -> CalendarCursor {
        let reference = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        CalendarCursor::new(reference, ViewMode::Month)
    }

    #[tokio::test]
    async fn load_renders_widgets_in_layout_order() {
        let mut server = mockito::Server::new_async().await;
        let _timeline = server
            .mock("GET", "/timeline/")
            .match_query(mockito::Matcher::Any)
            .with_body(
                r##"[
                {"id": 1, "title": "Past", "type": "event", "color": null,
                 "start": "2024-03-01T09:00:00Z", "end": "2024-03-01T10:00:00Z",
                 "is_completed": false},
                {"id": 2, "title": "Lecture", "type": "event", "color": null,
                 "start": "2024-03-20T09:00:00Z", "end": "2024-03-20T10:00:00Z",
                 "is_completed": false, "category_id": 5},
                {"id": 3, "title": "Essay", "type": "task", "color": null,
                 "start": "2024-03-21T09:00:00Z", "end": "2024-03-21T10:00:00Z",
                 "is_completed": true}
            ]"##,
            )
            .create_async()
            .await;
        let tasks: Vec<serde_json::Value> = (1..=7)
            .map(|id| {
                serde_json::json!({"id": id, "title": format!("t{id}"), "energy_required": "low"})
            })
            .collect();
        let _tasks = server
            .mock("GET", "/tasks/")
            .with_body(serde_json::to_string(&tasks).unwrap())
            .create_async()
            .await;
        let _categories = server
            .mock("GET", "/categories/")
            .with_body(r##"[{"id": 5, "name": "School", "color_hex": "#112233"}]"##)
            .create_async()
            .await;

        let (client, _) = client_for(&server.url(), Some("tok"));
        let dashboard = Dashboard::load(&client, &cursor(), &Utc).await.unwrap();
        assert_eq!(dashboard.entries[1].color, "#112233");

        let mut layout = WidgetLayout::default();
        layout.move_widget(1, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let widgets = dashboard.widgets(&layout, now);

        match &widgets[0] {
            Widget::Events(events) => {
                assert_eq!(events.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2]);
            }
            other => panic!("expected events widget, got {other:?}"),
        }
        match &widgets[1] {
            Widget::Tasks(tasks) => assert_eq!(tasks.len(), WIDGET_ROWS),
            other => panic!("expected tasks widget, got {other:?}"),
        }
        assert!(matches!(widgets[2], Widget::Categories(c) if c.len() == 1));
    }

    #[tokio::test]
    async fn load_fails_when_any_request_fails() {
        let mut server = mockito::Server::new_async().await;
        let _timeline = server
            .mock("GET", "/timeline/")
            .match_query(mockito::Matcher::Any)
            .with_body("[]")
            .create_async()
            .await;
        let _tasks = server.mock("GET", "/tasks/").with_status(500).create_async().await;
        let _categories = server.mock("GET", "/categories/").with_body("[]").create_async().await;

        let (client, feedback) = client_for(&server.url(), Some("tok"));
        let err = Dashboard::load(&client, &cursor(), &Utc).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(feedback.notices().len(), 1);
    }

    #[tokio::test]
    async fn deleting_category_removes_only_that_chip() {
        let mut server = mockito::Server::new_async().await;
        let _delete = server.mock("DELETE", "/categories/5").with_status(204).create_async().await;

        let (client, _) = client_for(&server.url(), Some("tok"));
        let chip = |id: i64| Category {
            id,
            name: format!("c{id}"),
            color_hex: "#50C878".into(),
            user_id: None,
        };
        let mut dashboard = Dashboard {
            range: cursor().range(),
            entries: Vec::new(),
            tasks: Vec::new(),
            categories: vec![chip(4), chip(5), chip(6)],
        };
        let removed = dashboard.delete_category(&client, 5).await.unwrap();
        assert_eq!(removed.map(|c| c.id), Some(5));
        assert_eq!(dashboard.categories.iter().map(|c| c.id).collect::<Vec<_>>(), vec![4, 6]);
    }
}
