use assert_cmd::Command;
use predicates::prelude::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;

fn reportdash(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("reportdash").unwrap();
    cmd.env("REPORTDASH_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("OPENAI_API_KEY");
    cmd
}

/// Serves one chat-completions response on localhost and returns the base url.
fn one_shot_completion_server(reply: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if request.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }

        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": reply}}]
        })
        .to_string();
        write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
        .unwrap();
    });

    format!("http://{}/v1", addr)
}

#[test]
fn test_list_shows_sample_reports() {
    let home = tempfile::tempdir().unwrap();
    reportdash(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Annual Physical Examination - John Doe"))
        .stdout(predicate::str::contains("Cardiac Consultation - Sarah Johnson"))
        .stdout(predicate::str::contains("Dermatological Consultation - Robert Martinez"));
}

#[test]
fn test_list_status_filter() {
    let home = tempfile::tempdir().unwrap();
    reportdash(home.path())
        .args(["list", "--status", "reviewed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sarah Johnson"))
        .stdout(predicate::str::contains("John Doe").not())
        .stdout(predicate::str::contains("Michael Chen").not());
}

#[test]
fn test_list_search_and_empty_view() {
    let home = tempfile::tempdir().unwrap();
    reportdash(home.path())
        .args(["list", "--search", "CHEN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Neurological Assessment - Michael Chen"))
        .stdout(predicate::str::contains("Emma Wilson").not());

    reportdash(home.path())
        .args(["list", "--category", "dermatology", "--status", "reviewed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No reports match the current filters."));
}

#[test]
fn test_view_renders_plain_text() {
    let home = tempfile::tempdir().unwrap();
    reportdash(home.path())
        .args(["view", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sarah Johnson (P002)"))
        .stdout(predicate::str::contains("• Stress test scheduled"))
        .stdout(predicate::str::contains("<li>").not());
}

#[test]
fn test_view_unknown_id_fails() {
    let home = tempfile::tempdir().unwrap();
    reportdash(home.path())
        .args(["view", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Report not found: 99"));
}

#[test]
fn test_move_within_filtered_view() {
    let home = tempfile::tempdir().unwrap();
    let output = reportdash(home.path())
        .args(["move", "2", "1", "--status", "draft"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved: Dermatological Consultation"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    // Skip the "Moved:" line; the rest is the re-listed view.
    let listing = &stdout[stdout.find('\n').unwrap()..];
    let martinez = listing.find("Robert Martinez").unwrap();
    let chen = listing.find("Michael Chen").unwrap();
    assert!(martinez < chen);
}

#[test]
fn test_move_rejects_zero_position() {
    let home = tempfile::tempdir().unwrap();
    reportdash(home.path())
        .args(["move", "0", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positions start at 1"));
}

#[test]
fn test_config_set_and_show() {
    let home = tempfile::tempdir().unwrap();
    reportdash(home.path())
        .args(["config", "model", "gpt-4o-mini"])
        .assert()
        .success()
        .stdout(predicate::str::contains("model set to gpt-4o-mini"));

    assert!(home.path().join("config.json").exists());

    reportdash(home.path())
        .args(["config", "model"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gpt-4o-mini"));

    reportdash(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("= OPENAI_API_KEY"));
}

#[test]
fn test_seed_file_replaces_samples() {
    let home = tempfile::tempdir().unwrap();
    let seed = home.path().join("seed.json");
    std::fs::write(
        &seed,
        r#"[{
            "id": "a1",
            "title": "Follow-up Visit - Lena Park",
            "patientName": "Lena Park",
            "patientId": "P900",
            "content": "<p>Stable.</p>",
            "category": "general",
            "priority": "low",
            "status": "completed",
            "dateCreated": "2024-03-01T09:00:00Z",
            "dateModified": "2024-03-01T09:00:00Z"
        }]"#,
    )
    .unwrap();

    reportdash(home.path())
        .args(["config", "seed-file", seed.to_str().unwrap()])
        .assert()
        .success();

    reportdash(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lena Park"))
        .stdout(predicate::str::contains("John Doe").not());
}

#[test]
fn test_draft_without_api_key_fails() {
    let home = tempfile::tempdir().unwrap();
    reportdash(home.path())
        .args(["draft", "chest", "pain"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_draft_and_save_against_local_server() {
    let home = tempfile::tempdir().unwrap();
    let base = one_shot_completion_server("<h3>Assessment</h3><p>Sprained ankle.</p>");

    reportdash(home.path())
        .args(["config", "api-base", &base])
        .assert()
        .success();

    reportdash(home.path())
        .env("OPENAI_API_KEY", "sk-local")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .args([
            "draft",
            "ankle",
            "sprain",
            "--specialty",
            "orthopedics",
            "--save",
            "--title",
            "Ankle Sprain - Dan Ortiz",
            "--patient-name",
            "Dan Ortiz",
            "--patient-id",
            "P321",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report created successfully!"))
        .stdout(predicate::str::contains("Sprained ankle."))
        .stdout(predicate::str::contains("orthopedics"));
}
