//! Command implementations.

pub mod check;
pub mod fetch;
pub mod plan;
pub mod widgets;

use crate::ui;
use gaze_kernel::config::{load_config, resolve_config_path, validate_config};
use gaze_kernel::KernelError;
use gaze_types::{GazeConfig, Page};
use std::path::PathBuf;

/// Load the config or exit with a hint.
pub(crate) fn load_or_exit(config: Option<PathBuf>) -> GazeConfig {
    match load_config(config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e @ KernelError::ConfigNotFound(_)) => {
            ui::error_with_fix(
                &e.to_string(),
                "create it, or point --config / GAZE_CONFIG at an existing file",
            );
            std::process::exit(1);
        }
        Err(e) => {
            let path = resolve_config_path(config.as_deref());
            ui::error_with_fix(
                &e.to_string(),
                &format!("edit {} and try again", path.display()),
            );
            std::process::exit(1);
        }
    }
}

/// Load and validate the config, or exit.
pub(crate) fn load_valid_or_exit(config: Option<PathBuf>) -> GazeConfig {
    let cfg = load_or_exit(config);
    if let Err(e) = validate_config(&cfg) {
        ui::error_with_fix(&e.to_string(), "run `gaze check` for details");
        std::process::exit(1);
    }
    cfg
}

/// Pages named on the command line, or all pages when none are named.
pub(crate) fn select_pages_or_exit(config: &GazeConfig, names: &[String]) -> Vec<Page> {
    match select_pages(config, names) {
        Ok(pages) => pages,
        Err(name) => {
            let known: Vec<&str> = config.pages.iter().map(|p| p.name.as_str()).collect();
            ui::error_with_fix(
                &format!("No page named '{name}'"),
                &format!("choose one of: {}", known.join(", ")),
            );
            std::process::exit(1);
        }
    }
}

/// Resolve page names in order. A page named more than once is selected
/// once. Returns the first name that matches no page.
fn select_pages<'a>(config: &GazeConfig, names: &'a [String]) -> Result<Vec<Page>, &'a str> {
    if names.is_empty() {
        return Ok(config.pages.clone());
    }

    let mut selected: Vec<Page> = Vec::with_capacity(names.len());
    for name in names {
        let page = config.page(name).ok_or(name.as_str())?;
        if selected.iter().any(|p| p.name == page.name) {
            tracing::debug!(page = %page.name, "Page selected more than once");
            continue;
        }
        selected.push(page.clone());
    }
    Ok(selected)
}

/// Print a JSON value to stdout.
pub(crate) fn print_json(value: &serde_json::Value, compact: bool) {
    let out = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    match out {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GazeConfig {
        GazeConfig {
            pages: vec![Page::new("Home"), Page::new("News")],
            ..Default::default()
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_all_pages_by_default() {
        let pages = select_pages(&config(), &[]).unwrap();
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn test_select_pages_keeps_order_and_dedupes() {
        let requested = names(&["News", "Home", "home", "News"]);
        let pages = select_pages(&config(), &requested).unwrap();
        let selected: Vec<&str> = pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(selected, vec!["News", "Home"]);
    }

    #[test]
    fn test_select_unknown_page() {
        let requested = names(&["Home", "Missing"]);
        assert_eq!(select_pages(&config(), &requested).unwrap_err(), "Missing");
    }
}
