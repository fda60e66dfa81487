use taskdesk_core::db::open_db_in_memory;
use taskdesk_core::repo::client_repo::{ClientRepository, SqliteClientRepository};
use taskdesk_core::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use taskdesk_core::service::client_service::ClientService;
use taskdesk_core::{
    Client, ClientStatus, Principal, RepoError, ServiceError, Task, TaskType, TeamMember,
};

fn client(name: &str) -> Client {
    Client::new(name, TaskType::Gst)
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteClientRepository::new(&conn);

    let mut acme = client("  Acme Ltd ");
    acme.gstin = Some("27AABCU9603R1ZM".to_string());
    let id = repo.create_client(&acme).unwrap();

    let loaded = repo.get_client(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Acme Ltd");
    assert_eq!(loaded.status, ClientStatus::Active);
    assert_eq!(loaded.gstin.as_deref(), Some("27AABCU9603R1ZM"));
}

#[test]
fn find_by_name_ignores_case_and_padding() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteClientRepository::new(&conn);
    let id = repo.create_client(&client("Acme Ltd")).unwrap();

    let found = repo.find_client_by_name(" ACME LTD ").unwrap().unwrap();
    assert_eq!(found.id, id);
    assert!(repo.find_client_by_name("Acme").unwrap().is_none());
}

#[test]
fn empty_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteClientRepository::new(&conn);

    let err = repo.create_client(&client("   ")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn update_missing_client_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteClientRepository::new(&conn);

    let mut ghost = client("Ghost");
    ghost.id = 42;
    let err = repo.update_client(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "client", .. }));
}

#[test]
fn bulk_import_skips_existing_and_repeated_names() {
    let conn = open_db_in_memory().unwrap();
    let service = ClientService::new(SqliteClientRepository::new(&conn));
    service.add_clients(&[client("Acme Ltd")]).unwrap();

    let summary = service
        .bulk_import_clients(&[client("acme ltd"), client("Beta LLP"), client("BETA LLP")])
        .unwrap();

    assert_eq!(summary.imported.len(), 1);
    assert_eq!(summary.skipped_duplicates, vec!["acme ltd", "BETA LLP"]);
    let names: Vec<String> = service
        .list_clients()
        .unwrap()
        .into_iter()
        .map(|client| client.name)
        .collect();
    assert_eq!(names, vec!["Acme Ltd", "Beta LLP"]);
}

#[test]
fn rename_propagates_to_task_client_name() {
    let conn = open_db_in_memory().unwrap();
    let clients = SqliteClientRepository::new(&conn);
    let tasks = SqliteTaskRepository::new(&conn);
    let client_id = clients.create_client(&client("Acme Ltd")).unwrap();

    let member = TeamMember::new(Principal::new("member-1"), "John Doe");
    let mut task = Task::new("File GST", "Acme Ltd", TaskType::Gst, &member);
    task.client_id = client_id;
    let task_id = tasks.create_task(&task).unwrap();

    let service = ClientService::new(clients);
    service
        .update_client(client_id, &client("Acme Industries"))
        .unwrap();

    let reloaded = tasks.get_task(task_id).unwrap().unwrap();
    assert_eq!(reloaded.client_name, "Acme Industries");
}

#[test]
fn update_clients_requires_matching_lengths() {
    let conn = open_db_in_memory().unwrap();
    let service = ClientService::new(SqliteClientRepository::new(&conn));

    let err = service.update_clients(&[1, 2], &[client("Only one")]).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[test]
fn search_matches_name_gstin_and_pan() {
    let conn = open_db_in_memory().unwrap();
    let service = ClientService::new(SqliteClientRepository::new(&conn));
    let mut acme = client("Acme Ltd");
    acme.pan = Some("AABCU9603R".to_string());
    let mut beta = client("Beta LLP");
    beta.gstin = Some("29AACFX1234A1Z5".to_string());
    service.add_clients(&[acme, beta]).unwrap();

    let by_pan = service.search_clients("u9603").unwrap();
    assert_eq!(by_pan.len(), 1);
    assert_eq!(by_pan[0].name, "Acme Ltd");

    let by_gstin = service.search_clients("AACFX").unwrap();
    assert_eq!(by_gstin[0].name, "Beta LLP");

    assert_eq!(service.search_clients("  ").unwrap().len(), 2);
}

#[test]
fn delete_clients_removes_each() {
    let conn = open_db_in_memory().unwrap();
    let service = ClientService::new(SqliteClientRepository::new(&conn));
    let ids = service
        .add_clients(&[client("Acme Ltd"), client("Beta LLP")])
        .unwrap();

    service.delete_clients(&ids).unwrap();
    assert!(service.list_clients().unwrap().is_empty());
    assert!(matches!(
        service.delete_client(ids[0]).unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}

#[test]
fn delete_clients_is_all_or_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = ClientService::new(SqliteClientRepository::new(&conn));
    let ids = service
        .add_clients(&[client("Acme Ltd"), client("Beta LLP")])
        .unwrap();

    assert!(matches!(
        service.delete_clients(&[ids[0], 999]).unwrap_err(),
        ServiceError::NotFound { entity: "client", .. }
    ));
    assert_eq!(service.list_clients().unwrap().len(), 2);
}

#[test]
fn update_clients_rolls_back_renames_on_a_missing_id() {
    let conn = open_db_in_memory().unwrap();
    let clients = SqliteClientRepository::new(&conn);
    let tasks = SqliteTaskRepository::new(&conn);
    let client_id = clients.create_client(&client("Acme Ltd")).unwrap();

    let member = TeamMember::new(Principal::new("member-1"), "John Doe");
    let mut task = Task::new("File GST", "Acme Ltd", TaskType::Gst, &member);
    task.client_id = client_id;
    let task_id = tasks.create_task(&task).unwrap();

    let service = ClientService::new(clients);
    let err = service
        .update_clients(
            &[client_id, 999],
            &[client("Acme Industries"), client("Ghost")],
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));

    assert_eq!(service.get_client(client_id).unwrap().name, "Acme Ltd");
    let reloaded = tasks.get_task(task_id).unwrap().unwrap();
    assert_eq!(reloaded.client_name, "Acme Ltd");

    service
        .update_clients(&[client_id], &[client("Acme Industries")])
        .unwrap();
    let reloaded = tasks.get_task(task_id).unwrap().unwrap();
    assert_eq!(reloaded.client_name, "Acme Industries");
}
