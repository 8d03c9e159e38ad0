//! # FocusFlow Core Library
//!
//! Client-side logic for FocusFlow, a task/event/calendar planner for
//! people with attention-regulation needs. The REST backend owns all
//! persistence and business rules; this crate talks to it and turns its
//! records into views. The `focusflow` CLI is a thin front end over the
//! same library.
//!
//! ## Architecture
//!
//! - **API gateway**: one async client attaching the bearer token and
//!   mapping failures to notices, with a 401 forcing re-login
//! - **Storage**: TOML configuration plus a small key/value store for the
//!   token and the dashboard layout
//! - **Calendar**: view-mode windows and the navigation cursor
//! - **Timeline**: composes backend items into styled calendar entries
//!   and lays out the single-day grid
//! - **Focus**: mirrors a server-side focus session as a ticking display
//!
//! ## Key Components
//!
//! - [`ApiClient`]: Gateway to the backend
//! - [`TokenStore`]: Bearer token persistence
//! - [`Config`]: Application configuration management
//! - [`view_range`]: Fetch window for a calendar view
//! - [`FocusTimer`]: Elapsed-time display for a focus session
//! - [`Feedback`]: Notices and navigation requests raised to the front end

pub mod api;
pub mod calendar;
pub mod dashboard;
pub mod error;
pub mod focus;
pub mod guard;
pub mod models;
pub mod notify;
pub mod storage;
pub mod timeline;

pub use api::{ApiClient, StopOptions, TimelineQuery};
pub use calendar::{view_range, CalendarCursor, Navigate, ViewMode, ViewRange};
pub use dashboard::{Dashboard, Widget, WidgetId, WidgetLayout};
pub use error::{ApiError, ConfigError, CoreError, StorageError, ValidationError};
pub use focus::{FocusSession, FocusStatus, FocusTimer};
pub use guard::{Access, RouteGuard};
pub use models::{Category, EnergyLevel, Event, Task, TaskStatus, User};
pub use notify::{Feedback, Notice, NoticeLevel, Route};
pub use storage::{Config, KeyValueStore, LocalStore, TokenStore};
pub use timeline::{compose, CalendarEntry, DayGrid, NowView, TimelineItem, TimelineItemType};
