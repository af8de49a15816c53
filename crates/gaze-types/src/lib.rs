//! Core types for the Gaze dashboard.
//!
//! This crate defines the shared data model used by the fetch kernel, the
//! built-in widgets, and the CLI: widget configurations, the declarative page
//! layout, widget data payloads, and the fetch result envelope. It contains no
//! business logic.

pub mod data;
pub mod error;
pub mod layout;
pub mod result;
pub mod widget;

pub use data::WidgetData;
pub use error::FetchError;
pub use layout::{Column, ColumnSize, FetchSettings, GazeConfig, Page, WidthPreset};
pub use result::{
    ChildResult, ContainerData, PageResults, ResultSummary, SplitColumnData, WidgetOutcome,
    WidgetResult, WidgetSlug,
};
pub use widget::{WidgetConfig, WidgetKind, WidgetMeta, WidgetTypeId};
