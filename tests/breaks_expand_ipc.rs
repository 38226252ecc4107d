use serde_json::json;
use std::collections::HashSet;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_timetabled");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn timetabled");
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
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

#[test]
fn apply_to_all_days_fans_out_one_record_per_day() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let resp = request(
        &mut stdin,
        &mut reader,
        "1",
        "breaks.expand",
        json!({
            "name": "Lunch",
            "type": "lunch",
            "afterPeriod": 3,
            "durationMinutes": 40,
            "applyToAllDays": true
        }),
    );
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(true));
    let breaks = resp
        .get("result")
        .and_then(|r| r.get("breaks"))
        .and_then(|v| v.as_array())
        .expect("breaks");
    assert_eq!(breaks.len(), 5);

    let days: Vec<u64> = breaks
        .iter()
        .map(|b| b["dayOfWeek"].as_u64().expect("day"))
        .collect();
    assert_eq!(days, vec![1, 2, 3, 4, 5]);

    let ids: HashSet<&str> = breaks
        .iter()
        .map(|b| b["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids.len(), 5, "fan-out must mint distinct ids");
    for b in breaks {
        assert_eq!(b["type"], "lunch");
        assert_eq!(b["afterPeriod"], 3);
        assert_eq!(b["durationMinutes"], 40);
    }

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn single_day_draft_keeps_its_day_and_honors_overrides() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let single = request(
        &mut stdin,
        &mut reader,
        "1",
        "breaks.expand",
        json!({
            "name": "Tea",
            "type": "tea_break",
            "afterPeriod": 2,
            "durationMinutes": 10,
            "dayOfWeek": 4,
            "applyToAllDays": false
        }),
    );
    let breaks = single
        .get("result")
        .and_then(|r| r.get("breaks"))
        .and_then(|v| v.as_array())
        .expect("breaks");
    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0]["dayOfWeek"], 4);

    // Per-request daysPerWeek wins over the session default.
    let wide = request(
        &mut stdin,
        &mut reader,
        "2",
        "breaks.expand",
        json!({
            "name": "Snack",
            "type": "snack",
            "afterPeriod": 1,
            "durationMinutes": 5,
            "applyToAllDays": true,
            "daysPerWeek": 7
        }),
    );
    let breaks = wide
        .get("result")
        .and_then(|r| r.get("breaks"))
        .and_then(|v| v.as_array())
        .expect("breaks");
    assert_eq!(breaks.len(), 7);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn drafts_without_a_day_or_with_bad_fields_are_rejected() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let no_day = request(
        &mut stdin,
        &mut reader,
        "1",
        "breaks.expand",
        json!({
            "name": "Recess",
            "type": "recess",
            "afterPeriod": 2,
            "durationMinutes": 15,
            "applyToAllDays": false
        }),
    );
    assert_eq!(no_day.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        no_day
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("missing_break_day")
    );

    let unknown_kind = request(
        &mut stdin,
        &mut reader,
        "2",
        "breaks.expand",
        json!({
            "name": "Mystery",
            "type": "siesta",
            "afterPeriod": 1,
            "durationMinutes": 20,
            "dayOfWeek": 1
        }),
    );
    assert_eq!(
        unknown_kind
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("bad_params")
    );

    let zero_duration = request(
        &mut stdin,
        &mut reader,
        "3",
        "breaks.expand",
        json!({
            "name": "Nothing",
            "type": "short_break",
            "afterPeriod": 1,
            "durationMinutes": 0,
            "dayOfWeek": 1
        }),
    );
    assert_eq!(
        zero_duration
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("invalid_break")
    );

    drop(stdin);
    let _ = child.wait();
}
