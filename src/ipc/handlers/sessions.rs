use crate::ipc::error::ok;
use crate::ipc::helpers::{get_optional_u64, get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request, Session};
use crate::selector::TransitionSelector;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

fn open_session(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let seed = get_optional_u64(params, "seed")?;
    let mut config = state.config.clone();
    if let Some(capacity) = get_optional_u64(params, "historyCapacity")? {
        if !(1..=32).contains(&capacity) {
            return Err(HandlerErr::bad_params("historyCapacity must be in 1..=32"));
        }
        config.history_capacity = capacity as usize;
    }

    // A seed makes the whole session replayable; otherwise draw from the OS.
    let rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let session_id = uuid::Uuid::new_v4().to_string();
    let opened_at = Utc::now();
    state.sessions.insert(
        session_id.clone(),
        Session {
            opened_at,
            last_selected_at: None,
            selections: 0,
            selector: TransitionSelector::new(state.rules.clone(), &config),
            rng,
        },
    );
    tracing::info!(
        session_id = %session_id,
        history_capacity = config.history_capacity,
        seeded = seed.is_some(),
        "slideshow session opened"
    );

    Ok(json!({
        "sessionId": session_id,
        "openedAt": opened_at.to_rfc3339(),
        "historyCapacity": config.history_capacity,
    }))
}

fn handle_session_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    match open_session(state, &req.params) {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    }
}

fn handle_session_close(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session_id = match get_required_str(&req.params, "sessionId") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let closed = match state.sessions.remove(&session_id) {
        Some(session) => {
            tracing::info!(
                session_id = %session_id,
                selections = session.selections,
                "slideshow session closed"
            );
            true
        }
        None => false,
    };
    ok(&req.id, json!({ "closed": closed }))
}

fn handle_session_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let mut rows: Vec<(&String, &Session)> = state.sessions.iter().collect();
    rows.sort_by(|a, b| a.1.opened_at.cmp(&b.1.opened_at).then_with(|| a.0.cmp(b.0)));
    let sessions: Vec<serde_json::Value> = rows
        .into_iter()
        .map(|(id, s)| {
            json!({
                "sessionId": id,
                "openedAt": s.opened_at.to_rfc3339(),
                "selections": s.selections,
            })
        })
        .collect();
    ok(&req.id, json!({ "sessions": sessions }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.open" => Some(handle_session_open(state, req)),
        "session.close" => Some(handle_session_close(state, req)),
        "session.list" => Some(handle_session_list(state, req)),
        _ => None,
    }
}
