//! Configuration loading from `~/.gaze/gaze.toml`.
//!
//! The path is taken from, in order: an explicit path (the CLI's `--config`),
//! the `GAZE_CONFIG` environment variable, then the default location.

use crate::error::{KernelError, KernelResult};
use crate::walker::{nesting_depth, page_widgets};
use gaze_types::layout::GazeConfig;
use gaze_types::widget::{WidgetKind, MAX_SPLIT_COLUMNS};
use gaze_types::{ColumnSize, WidgetConfig};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable overriding the config path.
pub const CONFIG_ENV_VAR: &str = "GAZE_CONFIG";

/// Maximum number of columns on one page.
pub const MAX_PAGE_COLUMNS: usize = 3;

/// Maximum number of `full` columns on one page.
pub const MAX_FULL_COLUMNS: usize = 2;

/// Resolve which config file to read.
pub fn resolve_config_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(default_config_path)
}

/// Load and parse the configuration. Does not validate it.
pub fn load_config(path: Option<&Path>) -> KernelResult<GazeConfig> {
    let config_path = resolve_config_path(path);
    if !config_path.exists() {
        return Err(KernelError::ConfigNotFound(config_path));
    }

    let contents = std::fs::read_to_string(&config_path)?;
    let config = parse_config(&contents)?;
    info!(
        path = %config_path.display(),
        pages = config.pages.len(),
        "Loaded configuration"
    );
    Ok(config)
}

/// Parse configuration from TOML text.
pub fn parse_config(contents: &str) -> KernelResult<GazeConfig> {
    Ok(toml::from_str(contents)?)
}

/// Check the layout rules a renderer depends on. Collects every problem
/// instead of stopping at the first.
///
/// Page names must be unique, ignoring ASCII case, since pages are looked
/// up and reported by name.
pub fn validate_config(config: &GazeConfig) -> KernelResult<()> {
    let mut issues = Vec::new();

    if config.pages.is_empty() {
        issues.push("at least one page is required".to_string());
    }
    if config.fetch.max_concurrency == 0 {
        issues.push("fetch.max_concurrency must be at least 1".to_string());
    }

    let mut seen_names = HashSet::new();
    for (i, page) in config.pages.iter().enumerate() {
        let trimmed = page.name.trim();
        if !trimmed.is_empty() && !seen_names.insert(trimmed.to_ascii_lowercase()) {
            issues.push(format!("page name '{}' is used more than once", page.name));
        }

        let label = if trimmed.is_empty() {
            issues.push(format!("page #{} has an empty name", i + 1));
            format!("page #{}", i + 1)
        } else {
            format!("page '{}'", page.name)
        };

        let columns = page.columns.len();
        if columns == 0 || columns > MAX_PAGE_COLUMNS {
            issues.push(format!(
                "{label} must have between 1 and {MAX_PAGE_COLUMNS} columns, found {columns}"
            ));
        }

        let full = page
            .columns
            .iter()
            .filter(|column| column.size == ColumnSize::Full)
            .count();
        if full == 0 || full > MAX_FULL_COLUMNS {
            issues.push(format!(
                "{label} must have 1 or {MAX_FULL_COLUMNS} full columns, found {full}"
            ));
        }

        let widgets: Vec<WidgetConfig> = page_widgets(page).cloned().collect();

        for widget in &widgets {
            check_split_columns(widget, &label, &mut issues);
        }

        let depth = nesting_depth(&widgets);
        if depth > config.fetch.max_nesting_depth {
            issues.push(format!(
                "{label} nests containers {depth} levels deep, maximum is {}",
                config.fetch.max_nesting_depth
            ));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(KernelError::Validation(issues))
    }
}

fn check_split_columns(widget: &WidgetConfig, label: &str, issues: &mut Vec<String>) {
    if let WidgetKind::SplitColumn(split) = &widget.kind {
        if let Some(n) = split.max_columns {
            if n == 0 || n > MAX_SPLIT_COLUMNS {
                issues.push(format!(
                    "{label}: split-column max_columns must be between 1 and {MAX_SPLIT_COLUMNS}, found {n}"
                ));
            }
        }
    }
    for child in widget.children().unwrap_or_default() {
        check_split_columns(child, label, issues);
    }
}

/// Default config file location.
pub fn default_config_path() -> PathBuf {
    gaze_home().join("gaze.toml")
}

/// Default Gaze home directory.
pub fn gaze_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".gaze")
}
