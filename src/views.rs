//! Read-only projections over tasks and readings.
//!
//! Nothing in here mutates its input; every helper returns a new list.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

use crate::models::{Category, Phase, Priority, Task, WaterReading};
use crate::phase::estimated_date_for_phase;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// A task is due soon when its due date is at most this many days away
pub const DUE_SOON_DAYS: f64 = 2.0;

/// Which tasks a list view shows. Unset fields match everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskFilter {
    pub show_completed: bool,
    pub phase_id: Option<usize>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            show_completed: true,
            phase_id: None,
            category: None,
            priority: None,
        }
    }
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        (self.show_completed || !task.completed)
            && self.phase_id.is_none_or(|p| task.phase_id == p)
            && self.category.is_none_or(|c| task.category == c)
            && self.priority.is_none_or(|p| task.priority == p)
    }
}

pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}

/// Canonical task list order.
///
/// 1) Incomplete before completed
/// 2) Tasks with a due date first, earliest due first
/// 3) Higher priority first
/// 4) Lower phase first
/// 5) Newest first
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.priority.cmp(&a.priority))
        .then_with(|| a.phase_id.cmp(&b.phase_id))
        .then_with(|| b.date.cmp(&a.date))
}

pub fn sort_tasks(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(compare_tasks);
    sorted
}

/// Filtered and sorted, as the task list shows it
pub fn task_list_view(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    let mut view = filter_tasks(tasks, filter);
    view.sort_by(compare_tasks);
    view
}

fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    ((due - now).num_milliseconds() as f64 / MILLIS_PER_DAY).ceil()
}

pub fn is_due_soon(task: &Task, now: DateTime<Utc>) -> bool {
    task.due_date
        .is_some_and(|due| (0.0..=DUE_SOON_DAYS).contains(&days_until(due, now)))
}

pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    task.due_date.is_some_and(|due| due < now)
}

/// The task's own due date, or the phase estimate when it has none
pub fn effective_due_date(task: &Task, phases: &[Phase], start: DateTime<Utc>) -> Option<DateTime<Utc>> {
    task.due_date.or_else(|| {
        phases
            .get(task.phase_id)
            .map(|phase| estimated_date_for_phase(phase, start))
    })
}

// ── Dashboard lists ─────────────────────────────────────────────────────────

/// Incomplete tasks belonging to `phase_id`, in stored order
pub fn phase_backlog(tasks: &[Task], phase_id: usize, limit: usize) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| !t.completed && t.phase_id == phase_id)
        .take(limit)
        .cloned()
        .collect()
}

pub fn high_priority(tasks: &[Task], limit: usize) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| !t.completed && t.priority == Priority::High)
        .take(limit)
        .cloned()
        .collect()
}

/// Incomplete tasks with a due date, earliest first
pub fn next_due(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut due: Vec<Task> = tasks
        .iter()
        .filter(|t| !t.completed && t.due_date.is_some())
        .cloned()
        .collect();
    due.sort_by_key(|t| t.due_date);
    due.truncate(limit);
    due
}

/// Incomplete tasks from phases after `current_phase`, earliest phase first
pub fn upcoming(tasks: &[Task], current_phase: usize, limit: usize) -> Vec<Task> {
    let mut later: Vec<Task> = tasks
        .iter()
        .filter(|t| !t.completed && t.phase_id > current_phase)
        .cloned()
        .collect();
    later.sort_by_key(|t| t.phase_id);
    later.truncate(limit);
    later
}

// ── Statistics ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhaseStats {
    pub phase_id: usize,
    pub total: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub percent_complete: u8,
    pub overdue: usize,
    pub due_soon: usize,
    /// One entry per timeline phase, in timeline order
    pub by_phase: Vec<PhaseStats>,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], phase_count: usize, now: DateTime<Utc>) -> Self {
        let mut by_phase: Vec<PhaseStats> = (0..phase_count)
            .map(|phase_id| PhaseStats {
                phase_id,
                ..Default::default()
            })
            .collect();

        let mut stats = Self {
            total: tasks.len(),
            ..Default::default()
        };

        for task in tasks {
            if task.completed {
                stats.completed += 1;
            } else {
                // finished tasks are never overdue
                if is_overdue(task, now) {
                    stats.overdue += 1;
                }
                if is_due_soon(task, now) {
                    stats.due_soon += 1;
                }
            }
            if let Some(entry) = by_phase.get_mut(task.phase_id) {
                entry.total += 1;
                if task.completed {
                    entry.completed += 1;
                }
            }
        }

        stats.remaining = stats.total - stats.completed;
        stats.percent_complete = if stats.total == 0 {
            0
        } else {
            (100.0 * stats.completed as f64 / stats.total as f64).round() as u8
        };
        stats.by_phase = by_phase;
        stats
    }
}

// ── Readings ────────────────────────────────────────────────────────────────

/// Oldest first, for charts
pub fn readings_by_date(readings: &[WaterReading]) -> Vec<WaterReading> {
    let mut sorted = readings.to_vec();
    sorted.sort_by_key(|r| r.date);
    sorted
}

/// Newest first, paired with each reading's position in the stored list so
/// callers can edit or delete the right one.
pub fn readings_newest_first(readings: &[WaterReading]) -> Vec<(usize, WaterReading)> {
    let mut indexed: Vec<(usize, WaterReading)> = readings.iter().cloned().enumerate().collect();
    indexed.sort_by(|a, b| b.1.date.cmp(&a.1.date));
    indexed
}

/// Most recently recorded reading
pub fn latest_reading(readings: &[WaterReading]) -> Option<&WaterReading> {
    readings.last()
}
