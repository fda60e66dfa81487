use rusqlite::Connection;
use taskdesk_core::db::open_db_in_memory;
use taskdesk_core::model::dto::{DashboardTasksRequest, DueDateDayType};
use taskdesk_core::repo::client_repo::{ClientRepository, SqliteClientRepository};
use taskdesk_core::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use taskdesk_core::service::dashboard_service::DashboardService;
use taskdesk_core::time::NANOS_PER_DAY;
use taskdesk_core::{
    Client, Principal, RevenueCardType, SortDirection, Task, TaskStatus, TaskType, TeamMember,
    Time,
};

/// 2026-03-31T00:00:00Z
const MARCH_31: Time = 1_774_915_200_000_000_000;

fn noon_march_31() -> Time {
    MARCH_31 + NANOS_PER_DAY / 2
}

fn dashboard(conn: &Connection) -> DashboardService<SqliteTaskRepository<'_>> {
    DashboardService::with_clock(SqliteTaskRepository::new(conn), noon_march_31)
}

fn insert(conn: &Connection, title: &str, edit: impl FnOnce(&mut Task)) {
    let clients = SqliteClientRepository::new(conn);
    let client_id = match clients.find_client_by_name("Acme Ltd").unwrap() {
        Some(client) => client.id,
        None => clients
            .create_client(&Client::new("Acme Ltd", TaskType::Gst))
            .unwrap(),
    };
    let member = TeamMember::new(Principal::new("member-1"), "John Doe");
    let mut task = Task::new(title, "Acme Ltd", TaskType::Gst, &member);
    task.client_id = client_id;
    edit(&mut task);
    task.refresh_outstanding();
    SqliteTaskRepository::new(conn).create_task(&task).unwrap();
}

#[test]
fn revenue_cards_sum_bill_advance_and_outstanding() {
    let conn = open_db_in_memory().unwrap();
    insert(&conn, "GST", |task| {
        task.bill = Some("50,000".to_string());
        task.advance_received = Some(25_000);
    });
    insert(&conn, "Audit", |task| {
        task.bill = Some("₹1,00,000".to_string());
    });
    insert(&conn, "Unbilled", |_| {});

    let service = dashboard(&conn);
    let cards = service.revenue_cards().unwrap();
    assert_eq!(cards.total_revenue, 150_000);
    assert_eq!(cards.total_collected, 25_000);
    assert_eq!(cards.total_outstanding, 125_000);

    let collected = service.revenue_modal(RevenueCardType::TotalCollected).unwrap();
    assert_eq!(collected.total_amount, 25_000);
    assert_eq!(collected.items.len(), 1);
    assert_eq!(collected.items[0].task_name, "GST");

    let revenue = service.revenue_modal(RevenueCardType::TotalRevenue).unwrap();
    assert_eq!(revenue.items.len(), 2);
    assert_eq!(revenue.total_amount, cards.total_revenue);
}

#[test]
fn due_date_counts_skip_completed_tasks() {
    let conn = open_db_in_memory().unwrap();
    insert(&conn, "today", |task| task.due_date = Some(MARCH_31));
    insert(&conn, "tomorrow", |task| task.due_date = Some(MARCH_31 + NANOS_PER_DAY));
    insert(&conn, "done today", |task| {
        task.due_date = Some(MARCH_31);
        task.status = TaskStatus::Completed;
    });
    insert(&conn, "next week", |task| {
        task.due_date = Some(MARCH_31 + 7 * NANOS_PER_DAY)
    });
    insert(&conn, "no date", |_| {});

    let service = dashboard(&conn);
    let counts = service.due_date_counts(None).unwrap();
    assert_eq!(counts.due_today_count, 1);
    assert_eq!(counts.due_tomorrow_count, 1);
    assert_eq!(counts.any_date_count, 3);
    assert_eq!(counts.custom_date_count, 0);

    let custom = service
        .due_date_counts(Some(MARCH_31 + 7 * NANOS_PER_DAY + 42))
        .unwrap();
    assert_eq!(custom.custom_date_count, 1);
}

#[test]
fn due_date_modal_selects_by_day_type() {
    let conn = open_db_in_memory().unwrap();
    insert(&conn, "later", |task| task.due_date = Some(MARCH_31 + 3 * NANOS_PER_DAY));
    insert(&conn, "today", |task| {
        task.due_date = Some(MARCH_31);
        task.comment = Some("call client".to_string());
    });

    let service = dashboard(&conn);
    assert_eq!(service.due_date_modal(None, None).unwrap(), None);

    let today = service
        .due_date_modal(Some(DueDateDayType::DueToday), None)
        .unwrap()
        .unwrap();
    assert_eq!(today.task_count, 1);
    assert_eq!(today.items[0].task_title, "today");
    assert_eq!(today.items[0].comments.as_deref(), Some("call client"));

    let any = service
        .due_date_modal(Some(DueDateDayType::AnyDate), None)
        .unwrap()
        .unwrap();
    let titles: Vec<&str> = any.items.iter().map(|item| item.task_title.as_str()).collect();
    assert_eq!(titles, vec!["today", "later"]);

    let custom = service
        .due_date_modal(None, Some(MARCH_31 + 3 * NANOS_PER_DAY))
        .unwrap()
        .unwrap();
    assert_eq!(custom.items[0].task_title, "later");
}

#[test]
fn dashboard_tasks_sort_each_panel_independently() {
    let conn = open_db_in_memory().unwrap();
    insert(&conn, "a", |task| {
        task.due_date = Some(3);
        task.status = TaskStatus::Completed;
        task.completion_date = Some(10);
    });
    insert(&conn, "b", |task| task.due_date = Some(1));
    insert(&conn, "c", |task| {
        task.status = TaskStatus::Completed;
        task.completion_date = Some(20);
    });

    let response = dashboard(&conn)
        .dashboard_tasks(&DashboardTasksRequest {
            completion_date_sort_direction: SortDirection::Desc,
            due_date_sort_direction: SortDirection::Asc,
        })
        .unwrap();

    let completion: Vec<&str> = response
        .completion_date_sorted
        .iter()
        .map(|task| task.title.as_str())
        .collect();
    assert_eq!(completion, vec!["c", "a", "b"]);

    let due: Vec<&str> = response
        .due_date_sorted
        .iter()
        .map(|task| task.title.as_str())
        .collect();
    assert_eq!(due, vec!["b", "a", "c"]);
}

#[test]
fn revenue_totals_saturate_on_huge_bills() {
    let conn = open_db_in_memory().unwrap();
    for title in ["Alpha", "Beta", "Gamma"] {
        insert(&conn, title, |task| {
            task.bill = Some("9,000,000,000,000,000,000".to_string());
        });
    }

    let service = dashboard(&conn);
    let cards = service.revenue_cards().unwrap();
    assert_eq!(cards.total_revenue, u64::MAX);
    assert_eq!(cards.total_outstanding, u64::MAX);
    assert_eq!(cards.total_collected, 0);

    let outstanding = service
        .revenue_modal(RevenueCardType::TotalOutstanding)
        .unwrap();
    assert_eq!(outstanding.items.len(), 3);
    assert_eq!(outstanding.total_amount, u64::MAX);
}
