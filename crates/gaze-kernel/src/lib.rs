//! Gaze kernel: widget registry and concurrent data-fetch orchestration.
//!
//! The kernel turns a declared page layout into a complete map of widget
//! results. It owns:
//! - the [`registry::WidgetRegistry`] mapping widget types to fetchers,
//! - slug resolution ([`slug`]) and layout walking ([`walker`]),
//! - the bounded [`scheduler::FetchScheduler`],
//! - the [`orchestrator::PageFetcher`] entry point and the fetch adapter that
//!   isolates every widget failure,
//! - the `group` and `split-column` container fetchers ([`containers`]),
//! - configuration loading and validation ([`config`]).

mod adapter;
pub mod config;
pub mod containers;
pub mod error;
pub mod orchestrator;
pub mod registry;
pub mod scheduler;
pub mod slug;
pub mod walker;

pub use error::{KernelError, KernelResult};
pub use orchestrator::{FetchContext, PageFetcher};
pub use registry::{RenderMode, WidgetDefinition, WidgetFetcher, WidgetRegistry};
pub use scheduler::FetchScheduler;
