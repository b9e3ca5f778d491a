// Rust guideline compliant 2026-08-05

//! Integration tests for the student service.
//!
//! These tests exercise the full operation contract over a real
//! temporary store: CRUD round trips, the cascade delete, the ticket
//! lifecycle, and the open-ticket view.

use campus_core::{Config, NewStudent, Storage};
use campus_service::{AppError, DataContext, ErrorCode, StudentService};
use tempfile::TempDir;

/// Helper to create a service with URL probing disabled.
fn service(dir: &TempDir) -> StudentService {
    let storage = Storage::new(dir.path().join("students.jsonl")).expect("Failed to open storage");
    let config = Config {
        probe_photo_urls: false,
        probe_timeout_secs: 5,
    };
    StudentService::new(storage, config)
}

/// Helper to create a student draft.
fn draft(name: &str, email: &str) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        email: email.to_string(),
        course: "Computing".to_string(),
        age: 20,
        grade: 72.0,
        photo_url: None,
    }
}

#[test]
fn test_list_students_empty_store() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);
    assert!(svc.list_students().is_empty());
}

#[test]
fn test_add_then_get_round_trip() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);

    let added = svc
        .add_student(draft("Homer Simpson", "homer@mail.com"))
        .expect("add_student should succeed");

    let fetched = svc.get_student(&added.id).expect("student should exist");
    assert_eq!(fetched.name, "Homer Simpson");
    assert_eq!(fetched.email, "homer@mail.com");
    assert_eq!(fetched.course, "Computing");
    assert_eq!(fetched.age, 20);
    assert_eq!(fetched.grade, 72.0);
    assert!(fetched.tickets.is_empty(), "new student has no tickets");
}

#[test]
fn test_add_student_rejects_invalid_input() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);

    let mut bad = draft("Homer Simpson", "homer@mail.com");
    bad.age = 12;
    assert!(svc.add_student(bad).is_none());

    let bad = draft("Homer Simpson", "not-an-email");
    assert!(svc.add_student(bad).is_none());

    assert!(svc.list_students().is_empty(), "nothing was persisted");
}

#[test]
fn test_get_missing_student_is_absent() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);
    assert!(svc.get_student("stu-ffffff").is_none());
}

#[test]
fn test_update_student_overwrites_fields_not_tickets() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);

    let student = svc
        .add_student(draft("Lisa Simpson", "lisa@mail.com"))
        .unwrap();
    let ticket = svc
        .create_ticket(&student.id, "Saxophone locker is stuck")
        .unwrap();

    let mut update = student.clone();
    update.grade = 95.5;
    update.tickets = Vec::new(); // must not act as a ticket side channel

    let saved = svc.update_student(&update).expect("update should succeed");
    assert_eq!(saved.grade, 95.5);
    assert_eq!(saved.tickets.len(), 1);
    assert_eq!(saved.tickets[0].id, ticket.id);
}

#[test]
fn test_update_missing_student_is_absent() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);

    let student = svc
        .add_student(draft("Ned Flanders", "ned@mail.com"))
        .unwrap();
    assert!(svc.delete_student(&student.id));

    assert!(svc.update_student(&student).is_none());
}

#[test]
fn test_delete_student_cascades() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);

    let student = svc
        .add_student(draft("Homer Simpson", "homer@mail.com"))
        .unwrap();
    let t1 = svc.create_ticket(&student.id, "Lost my id card").unwrap();
    let t2 = svc.create_ticket(&student.id, "Wrong grade shown").unwrap();

    assert!(svc.delete_student(&student.id));

    assert!(svc.get_student(&student.id).is_none());
    assert!(svc.get_ticket(&t1.id).is_none(), "cascade removed ticket 1");
    assert!(svc.get_ticket(&t2.id).is_none(), "cascade removed ticket 2");
}

#[test]
fn test_delete_missing_student_reports_false() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);
    assert!(!svc.delete_student("stu-ffffff"));
}

#[test]
fn test_create_ticket_issue_length_bounds() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);

    let student = svc
        .add_student(draft("Bart Simpson", "bart@mail.com"))
        .unwrap();

    assert!(
        svc.create_ticket(&student.id, "abc").is_none(),
        "3-character issue is below the minimum of 5"
    );
    assert!(
        svc.create_ticket(&student.id, &"x".repeat(101)).is_none(),
        "101-character issue exceeds the maximum of 100"
    );

    let ticket = svc
        .create_ticket(&student.id, "abcde")
        .expect("5-character issue is accepted");
    assert!(ticket.active);
    assert_eq!(ticket.student_id, student.id);
}

#[test]
fn test_create_ticket_for_missing_student_is_absent() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);
    assert!(svc.create_ticket("stu-ffffff", "A perfectly valid issue").is_none());
}

#[test]
fn test_update_ticket_changes_only_issue() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);

    let student = svc
        .add_student(draft("Marge Simpson", "marge@mail.com"))
        .unwrap();
    let ticket = svc
        .create_ticket(&student.id, "Parking permit rejected")
        .unwrap();

    let updated = svc
        .update_ticket(&ticket.id, "Parking permit expired")
        .expect("update should succeed");

    assert_eq!(updated.issue, "Parking permit expired");
    assert_eq!(updated.active, ticket.active);
    assert_eq!(updated.created_on, ticket.created_on);
    assert_eq!(updated.student_id, ticket.student_id);
}

#[test]
fn test_delete_ticket_leaves_student() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);

    let student = svc
        .add_student(draft("Milhouse Van Houten", "milhouse@mail.com"))
        .unwrap();
    let ticket = svc.create_ticket(&student.id, "Locker jammed again").unwrap();

    assert!(svc.delete_ticket(&ticket.id));
    assert!(!svc.delete_ticket(&ticket.id), "second delete reports false");

    let owner = svc.get_student(&student.id).expect("owner survives");
    assert!(owner.tickets.is_empty());
}

#[test]
fn test_close_ticket_lifecycle() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);

    let student = svc
        .add_student(draft("Ralph Wiggum", "ralph@mail.com"))
        .unwrap();
    let ticket = svc
        .create_ticket(&student.id, "My crayon broke in half")
        .unwrap();
    assert!(ticket.active);

    let closed = svc.close_ticket(&ticket.id).expect("close should succeed");
    assert!(!closed.active);

    // The closed state is durable
    let fetched = svc.get_ticket(&ticket.id).unwrap();
    assert!(!fetched.active);

    // Re-closing is a no-op failure, not a silent success
    assert!(svc.close_ticket(&ticket.id).is_none());

    // The strict surface names the reason
    let err = svc.try_close_ticket(&ticket.id).unwrap_err();
    assert_eq!(err.code(), ErrorCode::TicketClosed);
}

#[test]
fn test_close_missing_ticket_is_absent() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);
    assert!(svc.close_ticket("tkt-ffffff").is_none());
}

#[test]
fn test_open_tickets_view() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);

    let homer = svc
        .add_student(draft("Homer Simpson", "homer@mail.com"))
        .unwrap();
    let lisa = svc
        .add_student(draft("Lisa Simpson", "lisa@mail.com"))
        .unwrap();

    let t1 = svc.create_ticket(&homer.id, "Cafeteria card rejected").unwrap();
    let t2 = svc.create_ticket(&lisa.id, "Band room double booked").unwrap();

    let open = svc.get_open_tickets();
    assert_eq!(open.len(), 2);
    assert!(open.iter().all(|row| row.ticket.active));
    assert!(open
        .iter()
        .any(|row| row.ticket.id == t1.id && row.student_name == "Homer Simpson"));
    assert!(open
        .iter()
        .any(|row| row.ticket.id == t2.id && row.student_name == "Lisa Simpson"));

    // Closing removes a ticket from the view
    svc.close_ticket(&t1.id).unwrap();
    let open = svc.get_open_tickets();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].ticket.id, t2.id);

    // Closing the last open ticket empties the view
    svc.close_ticket(&t2.id).unwrap();
    assert!(svc.get_open_tickets().is_empty());
}

#[test]
fn test_strict_surface_distinguishes_failure_kinds() {
    let dir = TempDir::new().unwrap();
    let svc = service(&dir);

    let err = svc.try_get_student("stu-ffffff").unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);

    let mut bad = draft("Homer Simpson", "homer@mail.com");
    bad.grade = 400.0;
    let err = svc.try_add_student(bad).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);
}

#[test]
fn test_context_discover_requires_init() {
    let dir = TempDir::new().unwrap();

    let err = DataContext::discover(Some(dir.path())).unwrap_err();
    assert!(matches!(err, AppError::StoreNotInitialized { .. }));

    let ctx = DataContext::init(dir.path()).expect("init should succeed");
    assert!(ctx.campus_dir().exists());
    assert!(ctx.config_path().exists());

    // Discover now succeeds and the service opens over it
    let ctx = DataContext::discover(Some(dir.path())).expect("discover after init");
    let svc = StudentService::open(&ctx).expect("open service");
    assert!(svc.list_students().is_empty());
}
