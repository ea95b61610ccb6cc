use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar(config_file: Option<&PathBuf>) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_smartpaneld");
    let mut cmd = Command::new(exe);
    match config_file {
        Some(p) => cmd.env("SMARTPANELD_CONFIG", p),
        None => cmd.env_remove("SMARTPANELD_CONFIG"),
    };
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn smartpaneld");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

#[test]
fn config_defaults_and_validated_updates() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar(None);

    let cfg = request_ok(&mut stdin, &mut reader, "1", "config.get", json!({}));
    assert_eq!(cfg["historyCapacity"], 8);
    assert_eq!(cfg["minVariety"], 3);
    assert_eq!(cfg["recordManual"], false);
    assert_eq!(cfg["safeFallbackWeight"], 10);
    assert_eq!(cfg["defaultTransitionMode"], "auto");
    assert_eq!(cfg["defaultTransitionDurationMs"], 1000);

    let bad = request(
        &mut stdin,
        &mut reader,
        "2",
        "config.update",
        json!({ "patch": { "historyCapacity": 4, "wobble": true } }),
    );
    assert_eq!(bad["error"]["code"], "bad_params");
    // A rejected patch leaves nothing half-applied.
    let cfg = request_ok(&mut stdin, &mut reader, "3", "config.get", json!({}));
    assert_eq!(cfg["historyCapacity"], 8);

    let bad = request(&mut stdin, &mut reader, "4", "config.update", json!({ "patch": 5 }));
    assert_eq!(bad["error"]["code"], "bad_params");

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "config.update",
        json!({ "patch": { "historyCapacity": 3, "defaultTransitionDurationMs": 1800 } }),
    );
    let opened = request_ok(&mut stdin, &mut reader, "6", "session.open", json!({ "seed": 2 }));
    assert_eq!(opened["historyCapacity"], 3);
    let session_id = opened["sessionId"].as_str().expect("sessionId").to_string();

    let deck = json!([{ "content_type": "photo", "media_type": "image" }, {}]);
    for i in 0..5 {
        let r = request_ok(
            &mut stdin,
            &mut reader,
            &format!("s{}", i),
            "transition.select",
            json!({ "sessionId": session_id, "slides": deck, "index": 0 }),
        );
        assert_eq!(r["durationMs"], 1800);
    }
    let stats = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "transition.stats",
        json!({ "sessionId": session_id }),
    );
    assert_eq!(stats["total"], 3);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn record_manual_feeds_history_for_new_sessions() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar(None);
    let deck = json!([
        { "content_type": "rule", "media_type": "image",
          "transition_mode": "manual", "transition_type": "cube" },
        { "content_type": "rule", "media_type": "image" }
    ]);

    let before = request_ok(&mut stdin, &mut reader, "1", "session.open", json!({ "seed": 1 }));
    let before_id = before["sessionId"].as_str().expect("sessionId").to_string();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "config.update",
        json!({ "patch": { "recordManual": true } }),
    );
    let after = request_ok(&mut stdin, &mut reader, "3", "session.open", json!({ "seed": 1 }));
    let after_id = after["sessionId"].as_str().expect("sessionId").to_string();

    for (i, sid) in [&before_id, &after_id].into_iter().enumerate() {
        let r = request_ok(
            &mut stdin,
            &mut reader,
            &format!("m{}", i),
            "transition.select",
            json!({ "sessionId": sid, "slides": deck, "index": 0 }),
        );
        assert_eq!(r["transition"], "cube");
    }

    let stats = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "transition.stats",
        json!({ "sessionId": before_id }),
    );
    assert_eq!(stats["total"], 0);
    let stats = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "transition.stats",
        json!({ "sessionId": after_id }),
    );
    assert_eq!(stats["history"], json!(["cube"]));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn default_mode_applies_to_slides_without_a_mode() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar(None);
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "config.update",
        json!({ "patch": { "defaultTransitionMode": "random" } }),
    );
    let opened = request_ok(&mut stdin, &mut reader, "2", "session.open", json!({ "seed": 8 }));
    let session_id = opened["sessionId"].as_str().expect("sessionId").to_string();

    let deck = json!([{ "content_type": "custom" }, { "content_type": "custom", "transition_mode": "auto" }]);
    let r = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "transition.select",
        json!({ "sessionId": session_id, "slides": deck, "index": 0 }),
    );
    assert_eq!(r["mode"], "random");
    let r = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "transition.select",
        json!({ "sessionId": session_id, "slides": deck, "index": 1 }),
    );
    assert_eq!(r["mode"], "auto");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn config_file_from_env_is_applied_and_bad_files_are_ignored() {
    let dir = temp_dir("smartpaneld-config-env");
    let good = dir.join("good.json");
    std::fs::write(&good, r#"{ "historyCapacity": 5, "safeFallbackWeight": 40 }"#)
        .expect("write config");

    let (mut child, mut stdin, mut reader) = spawn_sidecar(Some(&good));
    let cfg = request_ok(&mut stdin, &mut reader, "1", "config.get", json!({}));
    assert_eq!(cfg["historyCapacity"], 5);
    assert_eq!(cfg["safeFallbackWeight"], 40);
    drop(stdin);
    let _ = child.wait();

    let bad = dir.join("bad.json");
    std::fs::write(&bad, "{ not json").expect("write config");
    let (mut child, mut stdin, mut reader) = spawn_sidecar(Some(&bad));
    let cfg = request_ok(&mut stdin, &mut reader, "1", "config.get", json!({}));
    assert_eq!(cfg["historyCapacity"], 8);
    drop(stdin);
    let _ = child.wait();
}
