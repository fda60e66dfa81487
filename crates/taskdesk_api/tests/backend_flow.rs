use taskdesk_api::{ApiError, Backend};
use taskdesk_core::model::dto::PublicSearchFilter;
use taskdesk_core::{
    Client, Principal, RevenueCardType, Task, TaskId, TaskType, TeamMember, Time,
    ToDoAuthRequest, ToDoItemCreate, UserProfile, UserRole,
};

/// 2026-03-31T00:00:00Z
const MARCH_31: Time = 1_774_915_200_000_000_000;

fn clock() -> Time {
    MARCH_31 + 3_600_000_000_000
}

fn profile(name: &str) -> UserProfile {
    UserProfile {
        name: name.to_string(),
        role: String::new(),
    }
}

/// Backend acting as a bootstrapped admin, plus a registered `staff` user.
fn workspace() -> Backend {
    let mut backend = Backend::open_in_memory(Principal::new("admin"))
        .unwrap()
        .with_clock(clock);
    backend.save_caller_user_profile(&profile("Admin")).unwrap();
    backend.set_caller(Principal::new("staff"));
    backend.save_caller_user_profile(&profile("Staff")).unwrap();
    backend.set_caller(Principal::new("admin"));
    backend
}

fn seed_task(backend: &Backend, assignee: &TeamMember) -> TaskId {
    let client_id = backend
        .add_clients(&[Client::new("Acme Ltd", TaskType::Gst)])
        .unwrap()[0];
    let mut task = Task::new("Audit FY26", "Acme Ltd", TaskType::Audit, assignee);
    task.client_id = client_id;
    task.bill = Some("₹40,000".to_string());
    task.advance_received = Some(10_000);
    backend.create_task(&task).unwrap()
}

#[test]
fn roles_gate_operations() {
    let mut backend = workspace();
    assert_eq!(backend.get_caller_user_role().unwrap(), UserRole::Admin);

    backend.set_caller(Principal::new("staff"));
    assert_eq!(backend.get_caller_user_role().unwrap(), UserRole::User);
    assert!(backend.get_clients().unwrap().is_empty());
    assert!(matches!(
        backend.add_clients(&[Client::new("Beta LLP", TaskType::Audit)]),
        Err(ApiError::Unauthorized(_))
    ));
    assert!(matches!(
        backend.get_user_profile(&Principal::new("admin")),
        Err(ApiError::Unauthorized(_))
    ));
    assert_eq!(
        backend.get_caller_user_profile().unwrap().map(|p| p.name),
        Some("Staff".to_string())
    );

    backend.set_caller(Principal::new("walk-in"));
    assert_eq!(backend.get_caller_user_role().unwrap(), UserRole::Guest);
    assert!(matches!(backend.get_tasks(), Err(ApiError::Unauthorized(_))));
    assert!(backend
        .public_search_clients(&PublicSearchFilter::new("acme"))
        .unwrap()
        .is_empty());

    backend.set_caller(Principal::new("admin"));
    backend
        .assign_caller_user_role(&Principal::new("walk-in"), UserRole::User)
        .unwrap();
    backend.set_caller(Principal::new("walk-in"));
    assert!(backend.get_tasks().unwrap().is_empty());
}

#[test]
fn csv_imports_preview_then_commit() {
    let backend = workspace();
    backend
        .create_team_member("John Doe", Principal::new("member-1"))
        .unwrap();

    let clients = backend
        .preview_client_import(
            "Name of Client,GSTIN,PAN,Task Category,Sub Category,Recurring of Task\n\
             Acme Ltd,27AABCU9603R1ZM,,GST,,Monthly\n\
             ,29AACFX1234A1Z5,,Audit,,\n",
        )
        .unwrap();
    assert_eq!(clients.len(), 2);
    assert!(clients[1].error.is_some());
    let summary = backend.commit_client_import(&clients).unwrap();
    assert_eq!(summary.imported.len(), 1);
    let again = backend.commit_client_import(&clients).unwrap();
    assert!(again.imported.is_empty());
    assert_eq!(again.skipped_duplicates.len(), 1);

    let tasks = backend
        .preview_task_import(
            "Client Name,Title,Task Type,Sub Type,Status,Comment,Assigned Name,Due Date,Assignment Date,Bill,Advance Received,Payment Status\n\
             Acme Ltd,File GST,GST,,Pending,,John Doe,2026-03-31,,50000,25000,Pending\n\
             Ghost Co,File TDS,TDS,,Pending,,John Doe,,,,,\n",
        )
        .unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks[0].is_valid());
    assert!(tasks[1]
        .error
        .as_deref()
        .is_some_and(|error| error.contains("Client not found")));

    let ids = backend.commit_task_import(&tasks).unwrap();
    assert_eq!(ids.len(), 1);
    let stored = backend.get_tasks().unwrap();
    assert_eq!(stored[0].outstanding_amount, Some(25_000));
    assert_eq!(stored[0].due_date, Some(MARCH_31));

    let report = backend.export_tasks_csv(None).unwrap();
    assert_eq!(report.file_name, "task_report_2026-03-31.csv");
    assert!(report
        .contents
        .contains("Acme Ltd,File GST,GST,,Pending,,John Doe,31/03/2026"));
}

#[test]
fn team_upload_is_all_or_nothing() {
    let backend = workspace();
    assert_eq!(
        backend.preview_team_import("Id,Name\n1,\n2,Jane Smith\n"),
        Err(ApiError::InvalidInput("Row 2: Name is required".to_string()))
    );

    let members = backend.preview_team_import("Name\nJohn Doe\nJane Smith\n").unwrap();
    backend.bulk_import_team_members(&members).unwrap();
    assert_eq!(backend.get_all_team_members().unwrap().len(), 2);

    assert!(matches!(
        backend.preview_team_import("Email\nx@y.z\n"),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn comments_and_deletes_need_assignee_or_admin() {
    let mut backend = workspace();
    let staff = TeamMember::new(Principal::new("staff"), "Staff");
    let id = seed_task(&backend, &staff);

    backend.set_caller(Principal::new("staff"));
    backend
        .update_task_comment(id, Some("waiting on ledger".to_string()))
        .unwrap();

    backend.set_caller(Principal::new("admin"));
    backend
        .assign_caller_user_role(&Principal::new("other"), UserRole::User)
        .unwrap();
    backend.set_caller(Principal::new("other"));
    assert!(matches!(
        backend.update_task_comment(id, None),
        Err(ApiError::Unauthorized(_))
    ));
    assert!(matches!(backend.delete_task(id), Err(ApiError::Unauthorized(_))));
    assert!(matches!(
        backend.delete_tasks(&[id]),
        Err(ApiError::Unauthorized(_))
    ));

    backend.set_caller(Principal::new("admin"));
    assert_eq!(
        backend.get_tasks().unwrap()[0].comment.as_deref(),
        Some("waiting on ledger")
    );
    backend.delete_task(id).unwrap();
    assert!(matches!(backend.delete_task(id), Err(ApiError::NotFound(_))));
}

#[test]
fn todos_stay_with_their_owner() {
    let mut backend = workspace();
    backend.set_caller(Principal::new("staff"));
    let id = backend
        .add_todo_item(&ToDoItemCreate {
            title: "Chase TDS certificate".to_string(),
            due_date: Some(MARCH_31),
            description: None,
        })
        .unwrap();
    let export = backend.export_todos_csv().unwrap();
    assert_eq!(export.file_name, "todo_list_2026-03-31.csv");
    assert!(export.contents.contains("Chase TDS certificate"));

    backend.set_caller(Principal::new("admin"));
    assert_eq!(
        backend.get_user_todos(&Principal::new("staff")).unwrap().len(),
        1
    );
    assert!(backend.get_todos_for_export().unwrap().is_empty());

    backend
        .assign_caller_user_role(&Principal::new("other"), UserRole::User)
        .unwrap();
    backend.set_caller(Principal::new("other"));
    let request = ToDoAuthRequest {
        owner: Principal::new("staff"),
        todo_id: id,
    };
    assert!(matches!(
        backend.delete_todo_item(&request),
        Err(ApiError::Unauthorized(_))
    ));
}

#[test]
fn dashboard_and_public_search_through_the_facade() {
    let mut backend = workspace();
    let staff = TeamMember::new(Principal::new("staff"), "Staff");
    seed_task(&backend, &staff);

    let cards = backend.get_revenue_cards_data().unwrap();
    assert_eq!(cards.total_revenue, 40_000);
    assert_eq!(cards.total_collected, 10_000);
    assert_eq!(cards.total_outstanding, 30_000);
    assert_eq!(backend.get_due_date_modal_data(None, None).unwrap(), None);

    let revenue = backend
        .export_revenue_csv(RevenueCardType::TotalOutstanding)
        .unwrap();
    assert_eq!(
        revenue.file_name,
        "revenue_details_totalOutstanding_2026-03-31.csv"
    );

    backend.set_caller(Principal::anonymous());
    let tasks = backend
        .public_search_tasks(&PublicSearchFilter::new("audit"))
        .unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].assigned_name, "Staff");
    assert!(backend
        .public_search_team_members(&PublicSearchFilter::new(""))
        .unwrap()
        .is_empty());
}

#[test]
fn file_database_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("workspace.sqlite3");

    {
        let backend = Backend::open(&path, Principal::new("admin")).unwrap();
        backend.save_caller_user_profile(&profile("Admin")).unwrap();
        backend
            .add_clients(&[Client::new("Acme Ltd", TaskType::Gst)])
            .unwrap();
    }

    let backend = Backend::open(&path, Principal::new("admin")).unwrap();
    assert!(backend.is_caller_admin().unwrap());
    assert_eq!(backend.get_clients().unwrap()[0].name, "Acme Ltd");
}
