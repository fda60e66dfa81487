//! Dashboard aggregation service: sorted task panels, revenue cards and
//! due-date cards with their drill-down rows.
//!
//! # Invariants
//! - Due-date counts and drill-downs only consider tasks that are not
//!   completed.
//! - Revenue drill-down rows only include tasks whose contribution to the
//!   selected card is nonzero; `total_amount` equals the card value.
//! - Card sums saturate at `u64::MAX` instead of overflowing.

use crate::model::dto::{
    DashboardTasksRequest, DashboardTasksResponse, DueDateCountResponse, DueDateDayType,
    DueDateModalResponse, DueDateTaskDetails, RevenueModalResponse, RevenueResponse,
    RevenueTaskDetails,
};
use crate::model::enums::{RevenueCardType, SortDirection, TaskStatus};
use crate::model::task::Task;
use crate::model::Time;
use crate::repo::task_repo::{TaskListQuery, TaskRepository};
use crate::service::ServiceResult;
use crate::time::{day_number, now_nanos, Clock};
use std::cmp::Ordering;

pub struct DashboardService<T: TaskRepository> {
    tasks: T,
    clock: Clock,
}

impl<T: TaskRepository> DashboardService<T> {
    pub fn new(tasks: T) -> Self {
        Self::with_clock(tasks, now_nanos)
    }

    pub fn with_clock(tasks: T, clock: Clock) -> Self {
        Self { tasks, clock }
    }

    /// Two views of every task, ordered by completion and by due date.
    /// Tasks without the sort key trail in both directions.
    pub fn dashboard_tasks(
        &self,
        request: &DashboardTasksRequest,
    ) -> ServiceResult<DashboardTasksResponse> {
        let tasks = self.all_tasks()?;

        let mut completion_date_sorted = tasks.clone();
        sort_missing_last(
            &mut completion_date_sorted,
            |task| task.completion_date,
            request.completion_date_sort_direction,
        );

        let mut due_date_sorted = tasks;
        sort_missing_last(
            &mut due_date_sorted,
            |task| task.due_date,
            request.due_date_sort_direction,
        );

        Ok(DashboardTasksResponse {
            completion_date_sorted,
            due_date_sorted,
        })
    }

    pub fn revenue_cards(&self) -> ServiceResult<RevenueResponse> {
        let tasks = self.all_tasks()?;
        Ok(tasks
            .iter()
            .fold(RevenueResponse::default(), |mut totals, task| {
                totals.total_revenue = totals
                    .total_revenue
                    .saturating_add(contribution(task, RevenueCardType::TotalRevenue));
                totals.total_collected = totals
                    .total_collected
                    .saturating_add(contribution(task, RevenueCardType::TotalCollected));
                totals.total_outstanding = totals
                    .total_outstanding
                    .saturating_add(contribution(task, RevenueCardType::TotalOutstanding));
                totals
            }))
    }

    pub fn revenue_modal(&self, card: RevenueCardType) -> ServiceResult<RevenueModalResponse> {
        let tasks = self.all_tasks()?;
        let mut total_amount: u64 = 0;
        let mut items = Vec::new();
        for task in &tasks {
            let amount = contribution(task, card);
            if amount > 0 {
                total_amount = total_amount.saturating_add(amount);
                items.push(RevenueTaskDetails::from(task));
            }
        }
        Ok(RevenueModalResponse {
            total_amount,
            items,
        })
    }

    /// Counts open tasks per due-date card. The custom card stays 0 unless
    /// `custom_date` is given.
    pub fn due_date_counts(&self, custom_date: Option<Time>) -> ServiceResult<DueDateCountResponse> {
        let today = day_number((self.clock)());
        let open = self.open_tasks()?;

        let mut counts = DueDateCountResponse::default();
        for due in open.iter().filter_map(|task| task.due_date) {
            let day = day_number(due);
            counts.any_date_count += 1;
            if day == today {
                counts.due_today_count += 1;
            }
            if day == today + 1 {
                counts.due_tomorrow_count += 1;
            }
            if custom_date.is_some_and(|custom| day_number(custom) == day) {
                counts.custom_date_count += 1;
            }
        }
        Ok(counts)
    }

    /// Drill-down rows for a due-date card, ordered by due date.
    ///
    /// `day_type` wins over `custom_date`; `None` when neither is given.
    pub fn due_date_modal(
        &self,
        day_type: Option<DueDateDayType>,
        custom_date: Option<Time>,
    ) -> ServiceResult<Option<DueDateModalResponse>> {
        let Some(day_type) = day_type.or(custom_date.map(DueDateDayType::CustomDate)) else {
            return Ok(None);
        };

        let today = day_number((self.clock)());
        let mut matching: Vec<Task> = self
            .open_tasks()?
            .into_iter()
            .filter(|task| {
                task.due_date.is_some_and(|due| {
                    let day = day_number(due);
                    match day_type {
                        DueDateDayType::DueToday => day == today,
                        DueDateDayType::DueTomorrow => day == today + 1,
                        DueDateDayType::AnyDate => true,
                        DueDateDayType::CustomDate(custom) => day == day_number(custom),
                    }
                })
            })
            .collect();
        sort_missing_last(&mut matching, |task| task.due_date, SortDirection::Asc);

        let items: Vec<DueDateTaskDetails> = matching.iter().map(DueDateTaskDetails::from).collect();
        Ok(Some(DueDateModalResponse {
            task_count: items.len() as u64,
            items,
        }))
    }

    fn all_tasks(&self) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list_tasks(&TaskListQuery::default())?)
    }

    fn open_tasks(&self) -> ServiceResult<Vec<Task>> {
        let mut tasks = self.all_tasks()?;
        tasks.retain(|task| task.status != TaskStatus::Completed);
        Ok(tasks)
    }
}

fn contribution(task: &Task, card: RevenueCardType) -> u64 {
    match card {
        RevenueCardType::TotalRevenue => task.bill_value(),
        RevenueCardType::TotalCollected => task.advance_received.unwrap_or(0),
        RevenueCardType::TotalOutstanding => task.outstanding_amount.unwrap_or(0),
    }
}

fn sort_missing_last(
    tasks: &mut [Task],
    key: impl Fn(&Task) -> Option<Time>,
    direction: SortDirection,
) {
    tasks.sort_by(|left, right| match (key(left), key(right)) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.cmp(&b),
            SortDirection::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::{contribution, sort_missing_last};
    use crate::model::enums::{RevenueCardType, SortDirection, TaskType};
    use crate::model::identity::{Principal, TeamMember};
    use crate::model::task::Task;

    fn task_due(title: &str, due: Option<i64>) -> Task {
        let member = TeamMember::new(Principal::new("member-1"), "John Doe");
        let mut task = Task::new(title, "Acme Ltd", TaskType::Gst, &member);
        task.due_date = due;
        task
    }

    #[test]
    fn missing_keys_trail_in_both_directions() {
        let mut tasks = vec![task_due("a", None), task_due("b", Some(2)), task_due("c", Some(1))];

        sort_missing_last(&mut tasks, |task| task.due_date, SortDirection::Desc);
        let titles: Vec<&str> = tasks.iter().map(|task| task.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c", "a"]);

        sort_missing_last(&mut tasks, |task| task.due_date, SortDirection::Asc);
        let titles: Vec<&str> = tasks.iter().map(|task| task.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
    }

    #[test]
    fn revenue_contribution_reads_bill_text() {
        let mut task = task_due("a", None);
        task.bill = Some("₹50,000".to_string());
        task.advance_received = Some(20_000);
        task.refresh_outstanding();

        assert_eq!(contribution(&task, RevenueCardType::TotalRevenue), 50_000);
        assert_eq!(contribution(&task, RevenueCardType::TotalCollected), 20_000);
        assert_eq!(contribution(&task, RevenueCardType::TotalOutstanding), 30_000);
    }
}
