//! `gaze check`: validate the configuration.

use super::load_or_exit;
use crate::ui;
use gaze_kernel::config::{resolve_config_path, validate_config};
use gaze_kernel::walker::{nesting_depth, page_widgets};
use gaze_kernel::KernelError;
use gaze_types::WidgetConfig;
use gaze_widgets::builtin_registry;
use std::path::PathBuf;

pub fn cmd_check(config: Option<PathBuf>) {
    let path = resolve_config_path(config.as_deref());
    ui::section("Configuration");
    ui::kv("Path", &path.display().to_string());

    let cfg = load_or_exit(config);
    ui::check_ok("Config parsed");
    ui::kv("Pages", &cfg.pages.len().to_string());
    ui::kv("Concurrency", &cfg.fetch.max_concurrency.to_string());
    ui::blank();

    let registry = builtin_registry(&cfg.fetch);
    ui::section("Pages");
    for page in &cfg.pages {
        let widgets: Vec<WidgetConfig> = page_widgets(page).cloned().collect();
        ui::check_ok(&format!(
            "{} ({} columns, {} widgets, nesting {})",
            page.name,
            page.columns.len(),
            widgets.len(),
            nesting_depth(&widgets)
        ));

        let mut unknown = Vec::new();
        collect_unknown_types(&widgets, &registry, &mut unknown);
        for type_name in unknown {
            ui::check_warn(&format!("  unknown widget type '{type_name}'"));
        }
    }
    ui::blank();

    match validate_config(&cfg) {
        Ok(()) => ui::check_ok("Layout is valid"),
        Err(KernelError::Validation(issues)) => {
            for issue in &issues {
                ui::check_fail(issue);
            }
            std::process::exit(1);
        }
        Err(e) => {
            ui::check_fail(&e.to_string());
            std::process::exit(1);
        }
    }
}

fn collect_unknown_types(
    widgets: &[WidgetConfig],
    registry: &gaze_kernel::WidgetRegistry,
    unknown: &mut Vec<String>,
) {
    for widget in widgets {
        let type_name = widget.type_name();
        if !registry.contains(type_name) && !unknown.iter().any(|t| t == type_name) {
            unknown.push(type_name.to_string());
        }
        collect_unknown_types(widget.children().unwrap_or_default(), registry, unknown);
    }
}
