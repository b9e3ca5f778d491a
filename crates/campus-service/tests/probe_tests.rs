// Rust guideline compliant 2026-08-05

//! Tests for the photo URL reachability probe.

use campus_core::{Config, NewStudent, Storage};
use campus_service::{probe, StudentService};
use httpmock::prelude::*;
use httpmock::Method::HEAD;
use std::time::Duration;
use tempfile::TempDir;

const TIMEOUT: Duration = Duration::from_secs(2);

#[test]
fn test_probe_accepts_reachable_resource() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(HEAD).path("/homer.png");
        then.status(200);
    });

    assert!(probe::resource_exists(&server.url("/homer.png"), TIMEOUT));
}

#[test]
fn test_probe_falls_back_to_get() {
    let server = MockServer::start();
    // Host answers GET only; HEAD goes unmatched
    server.mock(|when, then| {
        when.method(GET).path("/lisa.png");
        then.status(200);
    });

    assert!(probe::resource_exists(&server.url("/lisa.png"), TIMEOUT));
}

#[test]
fn test_probe_rejects_missing_resource() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(HEAD).path("/gone.png");
        then.status(404);
    });

    assert!(!probe::resource_exists(&server.url("/gone.png"), TIMEOUT));
}

#[test]
fn test_probe_rejects_unparseable_url() {
    assert!(!probe::resource_exists("not a url", TIMEOUT));
}

#[test]
fn test_probe_rejects_unreachable_host() {
    // Reserved port on localhost with nothing listening
    assert!(!probe::resource_exists("http://127.0.0.1:9/none.png", TIMEOUT));
}

fn probing_service(dir: &TempDir) -> StudentService {
    let storage = Storage::new(dir.path().join("students.jsonl")).unwrap();
    let config = Config {
        probe_photo_urls: true,
        probe_timeout_secs: 2,
    };
    StudentService::new(storage, config)
}

fn draft_with_photo(url: &str) -> NewStudent {
    NewStudent {
        name: "Homer Simpson".to_string(),
        email: "homer@mail.com".to_string(),
        course: "Computing".to_string(),
        age: 44,
        grade: 55.0,
        photo_url: Some(url.to_string()),
    }
}

#[test]
fn test_add_student_probes_photo_url() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(HEAD).path("/homer.png");
        then.status(200);
    });

    let dir = TempDir::new().unwrap();
    let svc = probing_service(&dir);

    let added = svc.add_student(draft_with_photo(&server.url("/homer.png")));
    assert!(added.is_some(), "reachable photo URL is accepted");
}

#[test]
fn test_add_student_rejects_dead_photo_url() {
    let server = MockServer::start();
    // No mock for the path: both HEAD and GET answer 404

    let dir = TempDir::new().unwrap();
    let svc = probing_service(&dir);

    let added = svc.add_student(draft_with_photo(&server.url("/missing.png")));
    assert!(added.is_none(), "dead photo URL is rejected at input time");
    assert!(svc.list_students().is_empty(), "nothing was persisted");
}

#[test]
fn test_probe_skipped_when_disabled() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path().join("students.jsonl")).unwrap();
    let config = Config {
        probe_photo_urls: false,
        probe_timeout_secs: 2,
    };
    let svc = StudentService::new(storage, config);

    // Syntactically valid but dead URL passes when probing is off
    let added = svc.add_student(draft_with_photo("http://127.0.0.1:9/none.png"));
    assert!(added.is_some());
}
