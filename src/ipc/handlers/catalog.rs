use crate::catalog::{Category, Transition, ALL, SAFE};
use crate::ipc::error::ok;
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Map, Value};

fn handle_catalog_list(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let transitions: Vec<Value> = ALL
        .iter()
        .map(|t| {
            json!({
                "name": t.name(),
                "category": t.category().name(),
                "safe": t.is_safe(),
            })
        })
        .collect();
    let mut categories = Map::new();
    for cat in Category::ALL {
        categories.insert(cat.name().to_string(), json!(cat.members()));
    }
    ok(
        &req.id,
        json!({
            "transitions": transitions,
            "categories": categories,
            "safe": SAFE,
        }),
    )
}

/// What the renderer will actually draw for a stored name.
fn handle_catalog_resolve(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match get_required_str(&req.params, "name") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let known = Transition::parse(&name).is_some();
    let resolved = Transition::parse_or_fade(&name);
    ok(
        &req.id,
        json!({
            "transition": resolved,
            "known": known,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "catalog.list" => Some(handle_catalog_list(state, req)),
        "catalog.resolve" => Some(handle_catalog_resolve(state, req)),
        _ => None,
    }
}
