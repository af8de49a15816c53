//! Built-in leaf widgets for Gaze dashboards.
//!
//! - `weather`: current conditions from OpenWeatherMap, or sample data when no key is set
//! - `rss`: items from an RSS 2.0 feed
//! - `hacker-news`: top, new or best stories from the Hacker News API
//!
//! [`builtin_registry`] returns a registry with these plus the kernel's
//! container widgets.

pub mod hacker_news;
pub mod http;
pub mod rss;
pub mod weather;

use gaze_kernel::containers::register_containers;
use gaze_kernel::{WidgetDefinition, WidgetRegistry};
use gaze_types::widget::kinds;
use gaze_types::{FetchSettings, WidgetTypeId};

pub use hacker_news::HackerNewsFetcher;
pub use rss::RssFetcher;
pub use weather::WeatherFetcher;

/// Register the leaf widgets on `registry`, sharing one HTTP client.
pub fn register_builtin_widgets(registry: &mut WidgetRegistry, settings: &FetchSettings) {
    let client = http::build_client(settings);

    registry.register(
        WidgetTypeId::from_static(kinds::WEATHER),
        WidgetDefinition::new(WeatherFetcher::new(client.clone())),
    );
    registry.register(
        WidgetTypeId::from_static(kinds::RSS),
        WidgetDefinition::new(RssFetcher::new(client.clone())),
    );
    registry.register(
        WidgetTypeId::from_static(kinds::HACKER_NEWS),
        WidgetDefinition::new(HackerNewsFetcher::new(client, settings.max_concurrency)),
    );
}

/// Registry with every built-in widget type, containers included.
pub fn builtin_registry(settings: &FetchSettings) -> WidgetRegistry {
    let mut registry = WidgetRegistry::new();
    register_containers(&mut registry);
    register_builtin_widgets(&mut registry, settings);
    registry
}
