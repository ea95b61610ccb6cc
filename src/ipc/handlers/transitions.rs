use crate::ipc::error::ok;
use crate::ipc::helpers::{get_optional_u64, session_mut, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::slide::SlideDescriptor;
use chrono::Utc;
use serde_json::json;

fn parse_slides(params: &serde_json::Value) -> Result<Vec<SlideDescriptor>, HandlerErr> {
    let Some(raw) = params.get("slides") else {
        return Err(HandlerErr::bad_params("missing slides"));
    };
    if !raw.is_array() {
        return Err(HandlerErr::bad_params("slides must be an array"));
    }
    let slides: Vec<SlideDescriptor> = serde_json::from_value(raw.clone())
        .map_err(|e| HandlerErr::bad_params(format!("invalid slide: {}", e)))?;
    if slides.is_empty() {
        return Err(HandlerErr::bad_params("slides must not be empty"));
    }
    Ok(slides)
}

fn select_transition(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let slides = parse_slides(params)?;
    let Some(index) = get_optional_u64(params, "index")? else {
        return Err(HandlerErr::bad_params("missing index"));
    };
    // Out-of-range positions are clamped rather than rejected.
    let index = usize::try_from(index)
        .unwrap_or(usize::MAX)
        .min(slides.len() - 1);
    let default_duration_ms = state.config.default_transition_duration_ms;

    let session = session_mut(state, params)?;
    let slide = &slides[index];
    let selection = session
        .selector
        .select(slide, &slides, index, &mut session.rng);
    session.selections += 1;
    session.last_selected_at = Some(Utc::now());

    Ok(json!({
        "transition": selection.transition,
        "category": selection.transition.category(),
        "durationMs": slide.duration_ms(default_duration_ms),
        "mode": selection.mode,
        "position": selection.position,
        "safeFallback": selection.safe_fallback,
        "index": index,
    }))
}

fn handle_transition_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    match select_transition(state, &req.params) {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    }
}

fn handle_transition_stats(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match session_mut(state, &req.params) {
        Ok(s) => s,
        Err(e) => return e.response(&req.id),
    };
    let history = session.selector.history();
    let stats = history.stats();
    ok(
        &req.id,
        json!({
            "total": stats.total,
            "history": stats.history,
            "variety": stats.variety,
            "mostRecent": stats.most_recent,
            "capacity": history.capacity(),
            "selections": session.selections,
            "openedAt": session.opened_at.to_rfc3339(),
            "lastSelectedAt": session.last_selected_at.map(|t| t.to_rfc3339()),
        }),
    )
}

fn handle_transition_reset_history(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = match session_mut(state, &req.params) {
        Ok(s) => s,
        Err(e) => return e.response(&req.id),
    };
    let cleared = session.selector.history().len();
    let was_empty = session.selector.history().is_empty();
    session.selector.reset_history();
    tracing::debug!(cleared, "transition history reset");
    ok(&req.id, json!({ "ok": true, "cleared": cleared, "wasEmpty": was_empty }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "transition.select" => Some(handle_transition_select(state, req)),
        "transition.stats" => Some(handle_transition_stats(state, req)),
        "transition.resetHistory" => Some(handle_transition_reset_history(state, req)),
        _ => None,
    }
}
