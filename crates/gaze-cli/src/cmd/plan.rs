//! `gaze plan`: show the slug tree of each page without fetching.

use super::{load_or_exit, print_json, select_pages_or_exit};
use gaze_kernel::walker::plan_tree;
use std::path::PathBuf;

pub fn cmd_plan(config: Option<PathBuf>, page_names: &[String], compact: bool) {
    let cfg = load_or_exit(config);
    let pages = select_pages_or_exit(&cfg, page_names);

    let mut out = serde_json::Map::new();
    for page in &pages {
        match serde_json::to_value(plan_tree(page)) {
            Ok(value) => {
                out.insert(page.name.clone(), value);
            }
            Err(e) => {
                eprintln!("Failed to serialize plan for '{}': {e}", page.name);
                std::process::exit(1);
            }
        }
    }

    print_json(&serde_json::Value::Object(out), compact);
}
