use crate::ipc::error::ok;
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use crate::media::{analyze_media_path, detect_media_type};
use serde_json::json;

fn handle_media_analyze(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match get_required_str(&req.params, "path") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let mime = req.params.get("mime").and_then(|v| v.as_str());

    let media_type = detect_media_type(&path, mime);
    let profile = analyze_media_path(&path, &state.rules);
    ok(
        &req.id,
        json!({
            "mediaType": media_type.name(),
            "mood": profile.mood,
            "brightness": profile.brightness,
            "recommended": profile.recommended,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "media.analyze" => Some(handle_media_analyze(state, req)),
        _ => None,
    }
}
