//! `gaze widgets`: list registered widget types.

use crate::ui;
use gaze_types::FetchSettings;
use gaze_widgets::builtin_registry;

pub fn cmd_widgets(json: bool) {
    let registry = builtin_registry(&FetchSettings::default());

    if json {
        let list: Vec<serde_json::Value> = registry
            .types()
            .into_iter()
            .filter_map(|type_id| {
                registry.get(type_id.as_str()).map(|def| {
                    serde_json::json!({
                        "type": type_id.as_str(),
                        "render": def.render.to_string(),
                    })
                })
            })
            .collect();
        super::print_json(&serde_json::Value::Array(list), false);
        return;
    }

    ui::section("Widget types");
    for type_id in registry.types() {
        if let Some(def) = registry.get(type_id.as_str()) {
            ui::kv(type_id.as_str(), &def.render.to_string());
        }
    }
}
