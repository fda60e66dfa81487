use rusqlite::Connection;
use taskdesk_core::db::open_db_in_memory;
use taskdesk_core::repo::client_repo::{ClientRepository, SqliteClientRepository};
use taskdesk_core::repo::task_repo::SqliteTaskRepository;
use taskdesk_core::service::task_service::TaskService;
use taskdesk_core::time::{millis_to_nanos, NANOS_PER_DAY};
use taskdesk_core::{
    Client, PaymentStatus, Principal, ServiceError, Task, TaskFilter, TaskStatus, TaskType,
    TeamMember, Time,
};

/// 2026-03-31T00:00:00Z
const MARCH_31: Time = 1_774_915_200_000_000_000;

fn fixed_clock() -> Time {
    MARCH_31 + 3_600_000_000_000
}

fn member() -> TeamMember {
    TeamMember::new(Principal::new("member-1"), "John Doe")
}

fn service(conn: &Connection) -> TaskService<SqliteTaskRepository<'_>, SqliteClientRepository<'_>> {
    TaskService::with_clock(
        SqliteTaskRepository::new(conn),
        SqliteClientRepository::new(conn),
        fixed_clock,
    )
}

fn seed_client(conn: &Connection, name: &str) -> u32 {
    SqliteClientRepository::new(conn)
        .create_client(&Client::new(name, TaskType::Gst))
        .unwrap()
}

fn task_for(client_id: u32, title: &str) -> Task {
    let mut task = Task::new(title, "", TaskType::Gst, &member());
    task.client_id = client_id;
    task
}

#[test]
fn create_resolves_client_and_stamps_dates() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn, "Acme Ltd");
    let service = service(&conn);

    let id = service.create_task(&task_for(client_id, "File GST")).unwrap();
    let task = service.get_task(id).unwrap();

    assert_eq!(task.client_name, "Acme Ltd");
    assert_eq!(task.created_at, fixed_clock());
    assert_eq!(task.assignment_date, Some(fixed_clock()));
    assert_eq!(task.completion_date, None);
    assert_eq!(task.outstanding_amount, None);
}

#[test]
fn create_falls_back_to_client_name_lookup() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn, "Acme Ltd");
    let service = service(&conn);

    let task = Task::new("File GST", "acme ltd", TaskType::Gst, &member());
    let id = service.create_task(&task).unwrap();
    let stored = service.get_task(id).unwrap();

    assert_eq!(stored.client_id, client_id);
    assert_eq!(stored.client_name, "Acme Ltd");
}

#[test]
fn create_with_unknown_client_fails() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let task = Task::new("File GST", "Nobody", TaskType::Gst, &member());
    assert!(matches!(
        service.create_task(&task).unwrap_err(),
        ServiceError::NotFound { entity: "client", .. }
    ));
}

#[test]
fn status_transitions_maintain_completion_date() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn, "Acme Ltd");
    let service = service(&conn);
    let id = service.create_task(&task_for(client_id, "File GST")).unwrap();

    service.update_task_status(id, TaskStatus::Completed).unwrap();
    assert_eq!(service.get_task(id).unwrap().completion_date, Some(fixed_clock()));

    service.update_task_status(id, TaskStatus::InProgress).unwrap();
    let reopened = service.get_task(id).unwrap();
    assert_eq!(reopened.status, TaskStatus::InProgress);
    assert_eq!(reopened.completion_date, None);
}

#[test]
fn bill_and_payment_updates_recompute_outstanding() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn, "Acme Ltd");
    let service = service(&conn);
    let id = service.create_task(&task_for(client_id, "Audit")).unwrap();

    service
        .update_task_bill(id, Some("₹50,000".to_string()), Some(20_000))
        .unwrap();
    assert_eq!(service.get_task(id).unwrap().outstanding_amount, Some(30_000));

    service
        .update_payment_status(id, PaymentStatus::Paid, Some(50_000), None)
        .unwrap();
    let paid = service.get_task(id).unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);
    assert_eq!(paid.bill.as_deref(), Some("₹50,000"));
    assert_eq!(paid.outstanding_amount, Some(0));
}

#[test]
fn assign_and_captains_are_persisted() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn, "Acme Ltd");
    let service = service(&conn);
    let id = service.create_task(&task_for(client_id, "TDS")).unwrap();

    service
        .assign_task(id, Principal::new("member-2"), " Jane Smith ")
        .unwrap();
    let captains = vec![Principal::new("lead-1"), Principal::new("lead-2")];
    service.update_task_captains(id, captains.clone()).unwrap();

    let task = service.get_task(id).unwrap();
    assert_eq!(task.assigned_to, Principal::new("member-2"));
    assert_eq!(task.assigned_name, "Jane Smith");
    assert_eq!(task.assignment_date, Some(fixed_clock()));
    assert_eq!(task.captains, captains);

    assert!(matches!(
        service.assign_task(id, Principal::new("member-3"), "  "),
        Err(ServiceError::InvalidInput(_))
    ));
}

#[test]
fn update_task_keeps_creation_stamp() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn, "Acme Ltd");
    let service = service(&conn);
    let id = service.create_task(&task_for(client_id, "File GST")).unwrap();

    let mut replacement = task_for(client_id, "File GSTR-3B");
    replacement.created_at = 1;
    replacement.comment = Some("waiting on invoices".to_string());
    service.update_task(id, &replacement).unwrap();

    let stored = service.get_task(id).unwrap();
    assert_eq!(stored.title, "File GSTR-3B");
    assert_eq!(stored.created_at, fixed_clock());
    assert_eq!(stored.comment.as_deref(), Some("waiting on invoices"));
}

#[test]
fn update_tasks_is_all_or_nothing() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn, "Acme Ltd");
    let service = service(&conn);
    let id = service.create_task(&task_for(client_id, "Original")).unwrap();

    let err = service
        .update_tasks(
            &[id, 999],
            &[task_for(client_id, "Changed"), task_for(client_id, "Ghost")],
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
    assert_eq!(service.get_task(id).unwrap().title, "Original");
}

#[test]
fn filter_combines_fields_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let acme = seed_client(&conn, "Acme Ltd");
    let beta = seed_client(&conn, "Beta LLP");
    let service = service(&conn);

    let mut gst = task_for(acme, "GST return");
    gst.sub_type = Some("GSTR-1".to_string());
    gst.comment = Some("Awaiting invoices".to_string());
    service.create_task(&gst).unwrap();
    let mut audit = task_for(beta, "Audit");
    audit.task_type = TaskType::Audit;
    service.create_task(&audit).unwrap();

    let filter = TaskFilter {
        sub_type: Some(" gstr-1 ".to_string()),
        assignee_name: Some("john doe".to_string()),
        search_term: Some("acme".to_string()),
        comment: Some("INVOICE".to_string()),
        ..TaskFilter::default()
    };
    let matched = service.filter_tasks(&filter).unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].title, "GST return");

    let by_type = service.tasks_by_type(TaskType::Audit).unwrap();
    assert_eq!(by_type.len(), 1);
    assert_eq!(by_type[0].client_name, "Beta LLP");
}

#[test]
fn filter_and_sort_by_client_name_orders_both_ways() {
    let conn = open_db_in_memory().unwrap();
    let zeta = seed_client(&conn, "zeta traders");
    let acme = seed_client(&conn, "Acme Ltd");
    let service = service(&conn);
    service.create_task(&task_for(zeta, "One")).unwrap();
    service.create_task(&task_for(acme, "Two")).unwrap();

    let ascending = service
        .filter_and_sort_by_client_name(&TaskFilter::default(), true)
        .unwrap();
    assert_eq!(ascending[0].client_name, "Acme Ltd");

    let descending = service
        .filter_and_sort_by_client_name(&TaskFilter::default(), false)
        .unwrap();
    assert_eq!(descending[0].client_name, "zeta traders");
}

#[test]
fn date_search_matches_due_or_completion_day() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn, "Acme Ltd");
    let service = service(&conn);

    let mut due = task_for(client_id, "Due today");
    due.due_date = Some(MARCH_31 + millis_to_nanos(5_000));
    service.create_task(&due).unwrap();

    let done = service.create_task(&task_for(client_id, "Done today")).unwrap();
    service.update_task_status(done, TaskStatus::Completed).unwrap();

    let mut later = task_for(client_id, "Due tomorrow");
    later.due_date = Some(MARCH_31 + NANOS_PER_DAY);
    service.create_task(&later).unwrap();

    let both = service.search_tasks_by_date(MARCH_31).unwrap();
    assert_eq!(both.date, MARCH_31);
    assert_eq!(both.tasks.len(), 2);

    let due_only = service.filter_tasks_by_date(MARCH_31, true, false).unwrap();
    assert_eq!(due_only.tasks.len(), 1);
    assert_eq!(due_only.tasks[0].title, "Due today");

    assert!(service
        .filter_tasks_by_date(MARCH_31, false, false)
        .unwrap()
        .tasks
        .is_empty());
}

#[test]
fn selected_export_ignores_unknown_ids() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn, "Acme Ltd");
    let service = service(&conn);
    let first = service.create_task(&task_for(client_id, "First")).unwrap();
    service.create_task(&task_for(client_id, "Second")).unwrap();

    let selected = service.selected_tasks_for_export(&[first, 404]).unwrap();
    assert_eq!(selected.len(), 1);
    assert!(service.selected_tasks_for_export(&[]).unwrap().is_empty());
    assert_eq!(service.all_tasks_for_export().unwrap().len(), 2);
}

#[test]
fn delete_tasks_rolls_back_on_missing_id() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn, "Acme Ltd");
    let service = service(&conn);
    let id = service.create_task(&task_for(client_id, "Keep")).unwrap();

    assert!(service.delete_tasks(&[id, 999]).is_err());
    assert_eq!(service.list_tasks().unwrap().len(), 1);

    service.delete_task(id).unwrap();
    assert!(service.list_tasks().unwrap().is_empty());
}

#[test]
fn advance_beyond_storage_range_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let client_id = seed_client(&conn, "Acme Ltd");

    let mut task = task_for(client_id, "File GST");
    task.advance_received = Some(u64::MAX);
    assert!(matches!(
        service.create_task(&task).unwrap_err(),
        ServiceError::InvalidInput(_)
    ));
    assert!(service.list_tasks().unwrap().is_empty());

    task.advance_received = Some(i64::MAX as u64);
    let id = service.create_task(&task).unwrap();
    assert_eq!(
        service.get_task(id).unwrap().advance_received,
        Some(i64::MAX as u64)
    );
}
