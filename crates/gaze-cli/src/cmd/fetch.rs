//! `gaze fetch`: fetch every widget of the selected pages.

use super::{load_valid_or_exit, print_json, select_pages_or_exit};
use gaze_kernel::PageFetcher;
use gaze_widgets::builtin_registry;
use std::path::PathBuf;
use std::sync::Arc;

pub fn cmd_fetch(
    config: Option<PathBuf>,
    page_names: &[String],
    concurrency: Option<usize>,
    compact: bool,
) {
    let mut cfg = load_valid_or_exit(config);
    if let Some(n) = concurrency {
        cfg.fetch.max_concurrency = n.max(1);
    }
    let pages = select_pages_or_exit(&cfg, page_names);

    let registry = Arc::new(builtin_registry(&cfg.fetch));
    let fetcher = PageFetcher::from_settings(registry, &cfg.fetch);

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to start async runtime: {e}");
        std::process::exit(1);
    });
    let results = rt.block_on(fetcher.fetch_pages(&pages));

    let mut out = serde_json::Map::new();
    for (page, page_results) in pages.iter().zip(results) {
        let summary = page_results.summary();
        tracing::debug!(
            page = %page.name,
            ok = summary.ok,
            failed = summary.failed,
            unregistered = summary.unregistered,
            "Serializing page results"
        );
        match serde_json::to_value(&page_results) {
            Ok(value) => {
                out.insert(page.name.clone(), value);
            }
            Err(e) => {
                eprintln!("Failed to serialize results for '{}': {e}", page.name);
                std::process::exit(1);
            }
        }
    }

    print_json(&serde_json::Value::Object(out), compact);
}
