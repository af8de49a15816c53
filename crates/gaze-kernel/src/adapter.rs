//! Fetch adapter: runs one widget's fetcher and folds every way it can end
//! into a [`WidgetResult`].

use crate::orchestrator::FetchContext;
use crate::registry::WidgetRegistry;
use futures::FutureExt;
use gaze_types::{FetchError, WidgetConfig, WidgetResult};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::{debug, warn};

/// Fetch a single widget. Never fails: a missing registration, an error, or a
/// panic inside the fetcher all become the matching result variant.
pub(crate) async fn fetch_one(
    registry: &WidgetRegistry,
    config: &WidgetConfig,
    cx: &FetchContext<'_>,
) -> WidgetResult {
    let type_name = config.type_name();
    let Some(definition) = registry.get(type_name) else {
        warn!(widget_type = type_name, "Unknown widget type");
        return WidgetResult::not_registered(config.clone());
    };

    debug!(widget_type = type_name, depth = cx.depth(), "Fetching widget");
    let start = Instant::now();
    let outcome = AssertUnwindSafe(definition.fetcher.fetch(config, cx))
        .catch_unwind()
        .await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(Ok(data)) => {
            debug!(widget_type = type_name, elapsed_ms, "Widget fetched");
            WidgetResult::success(config.clone(), data)
        }
        Ok(Err(e)) => {
            warn!(widget_type = type_name, elapsed_ms, error = %e, "Widget fetch failed");
            WidgetResult::failure(config.clone(), e.to_string())
        }
        Err(payload) => {
            let e = FetchError::Panicked(panic_message(payload.as_ref()));
            warn!(widget_type = type_name, elapsed_ms, error = %e, "Widget fetcher panicked");
            WidgetResult::failure(config.clone(), e.to_string())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
