//! The reading/task store.
//!
//! Holds readings and tasks in memory and writes each collection back to the
//! key/value backend right after every successful mutation. On open, a
//! missing collection is seeded and persisted. A collection that fails to
//! parse is copied to `<key>.corrupt`, logged, and replaced by its seed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;
use crate::models::{Category, NewTask, Phase, Priority, Task, WaterReading};
use crate::phase::CycleProgress;
use crate::timeline;

pub const READINGS_KEY: &str = "tankReadings";
pub const TASKS_KEY: &str = "tankTasks";
pub const THEME_KEY: &str = "darkMode";
pub const START_DATE_KEY: &str = "tankStartDate";

/// Suffix of the key a malformed blob is moved to before it is reseeded
pub const CORRUPT_SUFFIX: &str = ".corrupt";

enum Blob<T> {
    Missing,
    Corrupt(String),
    Parsed(T),
}

fn read_json<K: KeyValueStore, T: DeserializeOwned>(kv: &K, key: &str) -> Result<Blob<T>> {
    let Some(text) = kv.get(key)? else {
        return Ok(Blob::Missing);
    };
    match serde_json::from_str(&text) {
        Ok(value) => Ok(Blob::Parsed(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored data is malformed, falling back to defaults");
            Ok(Blob::Corrupt(text))
        }
    }
}

fn write_json<K: KeyValueStore, T: Serialize + ?Sized>(kv: &mut K, key: &str, value: &T) -> Result<()> {
    let text = serde_json::to_string(value)?;
    kv.set(key, &text)?;
    Ok(())
}

/// Keep a malformed blob under `<key>.corrupt`, then store the seed in its place
fn replace_corrupt<K: KeyValueStore, T: Serialize + ?Sized>(
    kv: &mut K,
    key: &str,
    raw: &str,
    seed: &T,
) -> Result<()> {
    let backup = format!("{key}{CORRUPT_SUFFIX}");
    kv.set(&backup, raw)?;
    tracing::warn!(key, backup = %backup, "Moved malformed data aside");
    write_json(kv, key, seed)
}

/// Category guessed from a template task's wording
pub fn infer_category(text: &str) -> Category {
    let text = text.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

    if has(&["test", "parameter"]) {
        Category::Testing
    } else if has(&["filter", "heater", "equipment"]) {
        Category::Equipment
    } else if has(&["water", "clean"]) {
        Category::Maintenance
    } else {
        Category::Other
    }
}

/// Priority guessed from a template task's wording
pub fn infer_priority(text: &str) -> Priority {
    let text = text.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

    if has(&["check", "monitor"]) {
        Priority::High
    } else if has(&["add", "ensure"]) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

fn new_task_id() -> String {
    Uuid::new_v4().to_string()
}

/// One task per template string of the first phase
pub fn seed_tasks(phases: &[Phase], now: DateTime<Utc>) -> Vec<Task> {
    let Some(first) = phases.first() else {
        return Vec::new();
    };

    first
        .tasks
        .iter()
        .map(|text| Task {
            id: new_task_id(),
            text: text.to_string(),
            completed: false,
            date: now,
            phase_id: 0,
            is_custom: false,
            due_date: None,
            priority: infer_priority(text),
            category: infer_category(text),
        })
        .collect()
}

/// Move tasks that point past the end of the timeline onto its last phase
fn clamp_phases(mut tasks: Vec<Task>, phase_count: usize) -> Vec<Task> {
    let last = phase_count.saturating_sub(1);
    for task in tasks.iter_mut().filter(|t| t.phase_id > last) {
        tracing::warn!(id = %task.id, phase = task.phase_id, "Task references an unknown phase, moving it to the last one");
        task.phase_id = last;
    }
    tasks
}

/// Application state for one tank
pub struct TankStore<K, C = SystemClock> {
    kv: K,
    clock: C,
    phases: &'static [Phase],
    readings: Vec<WaterReading>,
    tasks: Vec<Task>,
    start_date: Option<DateTime<Utc>>,
    dark_mode: bool,
}

impl<K: KeyValueStore> TankStore<K, SystemClock> {
    /// Open with the built-in timeline and the system clock
    pub fn open(kv: K) -> Result<Self> {
        Self::open_with(kv, SystemClock, timeline::phases())
    }
}

impl<K: KeyValueStore, C: Clock> TankStore<K, C> {
    pub fn open_with(kv: K, clock: C, phases: &'static [Phase]) -> Result<Self> {
        let mut store = Self {
            kv,
            clock,
            phases,
            readings: Vec::new(),
            tasks: Vec::new(),
            start_date: None,
            dark_mode: false,
        };
        store.load()?;
        Ok(store)
    }

    fn load(&mut self) -> Result<()> {
        self.readings = match read_json(&self.kv, READINGS_KEY)? {
            Blob::Parsed(readings) => readings,
            Blob::Missing => {
                let seeded = timeline::initial_readings();
                write_json(&mut self.kv, READINGS_KEY, &seeded)?;
                seeded
            }
            Blob::Corrupt(raw) => {
                let seeded = timeline::initial_readings();
                replace_corrupt(&mut self.kv, READINGS_KEY, &raw, &seeded)?;
                seeded
            }
        };

        let now = self.clock.now();
        self.tasks = match read_json(&self.kv, TASKS_KEY)? {
            Blob::Parsed(tasks) => clamp_phases(tasks, self.phases.len()),
            Blob::Missing => {
                tracing::info!("No saved tasks, seeding from the first phase");
                let seeded = seed_tasks(self.phases, now);
                write_json(&mut self.kv, TASKS_KEY, &seeded)?;
                seeded
            }
            Blob::Corrupt(raw) => {
                let seeded = seed_tasks(self.phases, now);
                replace_corrupt(&mut self.kv, TASKS_KEY, &raw, &seeded)?;
                seeded
            }
        };

        self.start_date = match self.kv.get(START_DATE_KEY)? {
            Some(text) if !text.is_empty() => match DateTime::parse_from_rfc3339(&text) {
                Ok(dt) => Some(dt.with_timezone(&Utc)),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored start date is malformed, ignoring it");
                    None
                }
            },
            _ => None,
        };

        self.dark_mode = self.kv.get(THEME_KEY)?.as_deref() == Some("true");

        tracing::debug!(
            readings = self.readings.len(),
            tasks = self.tasks.len(),
            "Store loaded"
        );
        Ok(())
    }

    fn persist_readings(&mut self) -> Result<()> {
        write_json(&mut self.kv, READINGS_KEY, &self.readings)
    }

    fn persist_tasks(&mut self) -> Result<()> {
        write_json(&mut self.kv, TASKS_KEY, &self.tasks)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn timeline(&self) -> &'static [Phase] {
        self.phases
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    // ── Readings ────────────────────────────────────────────────────────────

    /// Readings in insertion order
    pub fn readings(&self) -> &[WaterReading] {
        &self.readings
    }

    pub fn add_reading(&mut self, reading: WaterReading) -> Result<()> {
        self.readings.push(reading);
        self.persist_readings()
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position >= self.readings.len() {
            return Err(StoreError::PositionOutOfRange {
                position,
                len: self.readings.len(),
            });
        }
        Ok(())
    }

    /// Remove the reading at `position`, returning it
    pub fn delete_reading(&mut self, position: usize) -> Result<WaterReading> {
        self.check_position(position)?;
        let removed = self.readings.remove(position);
        self.persist_readings()?;
        Ok(removed)
    }

    /// Replace the reading at `position`, returning the previous one
    pub fn update_reading(&mut self, position: usize, reading: WaterReading) -> Result<WaterReading> {
        self.check_position(position)?;
        let previous = std::mem::replace(&mut self.readings[position], reading);
        self.persist_readings()?;
        Ok(previous)
    }

    // ── Tasks ───────────────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn check_phase(&self, phase_id: usize) -> Result<()> {
        if phase_id >= self.phases.len() {
            return Err(StoreError::UnknownPhase {
                phase_id,
                phases: self.phases.len(),
            });
        }
        Ok(())
    }

    /// Store a new task under a freshly generated id
    pub fn add_task(&mut self, task: NewTask) -> Result<Task> {
        self.check_phase(task.phase_id)?;
        let task = task.with_id(new_task_id());
        self.tasks.push(task.clone());
        self.persist_tasks()?;
        tracing::debug!(id = %task.id, phase = task.phase_id, "Task added");
        Ok(task)
    }

    /// Add a user-defined task created now
    pub fn create_task(
        &mut self,
        text: impl Into<String>,
        phase_id: usize,
        due_date: Option<DateTime<Utc>>,
        priority: Priority,
        category: Category,
    ) -> Result<Task> {
        let task = NewTask {
            text: text.into(),
            completed: false,
            date: self.now(),
            phase_id,
            is_custom: true,
            due_date,
            priority,
            category,
        };
        self.add_task(task)
    }

    /// Flip a task's completion flag. Returns the new value, or `None` when
    /// no task has that id.
    pub fn toggle_task_completion(&mut self, id: &str) -> Result<Option<bool>> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.completed = !task.completed;
        let completed = task.completed;
        self.persist_tasks()?;
        Ok(Some(completed))
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Option<Task>> {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        let removed = self.tasks.remove(idx);
        self.persist_tasks()?;
        Ok(Some(removed))
    }

    /// Replace the task stored under `id`. The payload must carry the same id.
    /// Returns `false` when no task has that id.
    pub fn update_task(&mut self, id: &str, task: Task) -> Result<bool> {
        if task.id != id {
            return Err(StoreError::IdMismatch {
                expected: id.to_string(),
                found: task.id,
            });
        }
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        self.check_phase(task.phase_id)?;
        self.tasks[idx] = task;
        self.persist_tasks()?;
        Ok(true)
    }

    pub fn set_task_due_date(&mut self, id: &str, due_date: Option<DateTime<Utc>>) -> Result<bool> {
        let Some(task) = self.task(id) else {
            return Ok(false);
        };
        let updated = Task {
            due_date,
            ..task.clone()
        };
        self.update_task(id, updated)
    }

    // ── Cycle start ─────────────────────────────────────────────────────────

    /// When the cycle began: the explicitly set start date if there is one,
    /// otherwise the earliest reading.
    pub fn cycle_start(&self) -> Option<DateTime<Utc>> {
        self.start_date
            .or_else(|| self.readings.iter().map(|r| r.date).min())
    }

    pub fn explicit_start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    pub fn set_cycle_start(&mut self, start: DateTime<Utc>) -> Result<()> {
        self.start_date = Some(start);
        self.kv.set(START_DATE_KEY, &start.to_rfc3339())?;
        Ok(())
    }

    pub fn clear_cycle_start(&mut self) -> Result<()> {
        self.start_date = None;
        self.kv.set(START_DATE_KEY, "")?;
        Ok(())
    }

    pub fn progress(&self) -> Option<CycleProgress> {
        let start = self.cycle_start()?;
        Some(CycleProgress::compute(self.phases, start, self.now()))
    }

    pub fn current_phase_index(&self) -> Option<usize> {
        self.progress().and_then(|p| p.phase_index)
    }

    pub fn current_phase(&self) -> Option<&'static Phase> {
        let phases = self.phases;
        self.current_phase_index().map(|idx| &phases[idx])
    }

    // ── Display preference ──────────────────────────────────────────────────

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<()> {
        self.dark_mode = enabled;
        self.kv.set(THEME_KEY, if enabled { "true" } else { "false" })?;
        Ok(())
    }

    pub fn toggle_dark_mode(&mut self) -> Result<bool> {
        let enabled = !self.dark_mode;
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::kv::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap()
    }

    fn open(kv: MemoryStore) -> TankStore<MemoryStore, FixedClock> {
        TankStore::open_with(kv, FixedClock::new(t0()), timeline::phases()).unwrap()
    }

    fn reading(date: DateTime<Utc>) -> WaterReading {
        WaterReading {
            date,
            ammonia: 0.0,
            nitrite: 0.0,
            nitrate: 0.0,
            ph: 7.2,
            temperature: 78.0,
            notes: None,
        }
    }

    #[test]
    fn category_rules_apply_in_order() {
        assert_eq!(infer_category("Test water parameters daily"), Category::Testing);
        assert_eq!(infer_category("Start filter"), Category::Equipment);
        assert_eq!(infer_category("Clean the HEATER"), Category::Equipment);
        assert_eq!(infer_category("Fill tank with water"), Category::Maintenance);
        assert_eq!(infer_category("Add ammonia source"), Category::Other);
    }

    #[test]
    fn priority_rules_apply_in_order() {
        assert_eq!(infer_priority("Monitor and add"), Priority::High);
        assert_eq!(infer_priority("Add water conditioner"), Priority::Medium);
        assert_eq!(infer_priority("Ensure flow"), Priority::Medium);
        assert_eq!(infer_priority("Start filter"), Priority::Low);
    }

    #[test]
    fn fresh_store_seeds_and_persists() {
        let store = open(MemoryStore::new());

        assert_eq!(store.readings(), timeline::initial_readings().as_slice());
        assert_eq!(store.tasks().len(), 6);
        assert!(store.tasks().iter().all(|t| t.phase_id == 0 && !t.is_custom && !t.completed));
        assert!(store.tasks().iter().all(|t| t.date == t0()));
        assert!(store.kv().get(READINGS_KEY).unwrap().is_some());
        assert!(store.kv().get(TASKS_KEY).unwrap().is_some());
    }

    #[test]
    fn seeding_is_deterministic_apart_from_ids() {
        let a = open(MemoryStore::new());
        let b = open(MemoryStore::new());
        let key = |t: &Task| (t.text.clone(), t.category, t.priority, t.phase_id);

        let left: Vec<_> = a.tasks().iter().map(key).collect();
        let right: Vec<_> = b.tasks().iter().map(key).collect();
        assert_eq!(left, right);
        assert_ne!(a.tasks()[0].id, b.tasks()[0].id);
    }

    #[test]
    fn seeded_first_phase_tasks_get_expected_labels() {
        let store = open(MemoryStore::new());
        let labels: Vec<_> = store
            .tasks()
            .iter()
            .map(|t| (t.text.as_str(), t.category, t.priority))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("Set up tank and equipment", Category::Equipment, Priority::Low),
                ("Add substrate and decorations", Category::Other, Priority::Medium),
                ("Fill tank with water", Category::Maintenance, Priority::Low),
                ("Add water conditioner", Category::Maintenance, Priority::Medium),
                ("Start filter", Category::Equipment, Priority::Low),
                ("Add ammonia source", Category::Other, Priority::Medium),
            ]
        );
    }

    #[test]
    fn reopening_keeps_state() {
        let mut store = open(MemoryStore::new());
        store.add_reading(reading(t0())).unwrap();
        let task = store
            .create_task("Dose bacteria", 1, None, Priority::High, Category::Other)
            .unwrap();

        let reopened = open(store.kv().clone());
        assert_eq!(reopened.readings().len(), 2);
        assert_eq!(reopened.task(&task.id), Some(&task));
    }

    #[test]
    fn reading_add_then_delete_leaves_collection_empty() {
        let mut kv = MemoryStore::new();
        kv.set(READINGS_KEY, "[]").unwrap();
        let mut store = open(kv);

        store.add_reading(reading(t0())).unwrap();
        store.delete_reading(0).unwrap();
        assert!(store.readings().is_empty());
        assert_eq!(store.kv().get(READINGS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn out_of_range_position_is_rejected() {
        let mut store = open(MemoryStore::new());
        let err = store.delete_reading(5).unwrap_err();
        assert!(matches!(err, StoreError::PositionOutOfRange { position: 5, len: 1 }));

        let err = store.update_reading(1, reading(t0())).unwrap_err();
        assert!(matches!(err, StoreError::PositionOutOfRange { .. }));
        assert_eq!(store.readings().len(), 1);
    }

    #[test]
    fn update_reading_replaces_in_place() {
        let mut store = open(MemoryStore::new());
        let mut replacement = reading(t0());
        replacement.ammonia = 2.0;
        let previous = store.update_reading(0, replacement.clone()).unwrap();
        assert_eq!(previous.ph, 7.2);
        assert_eq!(store.readings()[0], replacement);
    }

    #[test]
    fn toggle_twice_restores_completion() {
        let mut store = open(MemoryStore::new());
        let id = store.tasks()[0].id.clone();

        assert_eq!(store.toggle_task_completion(&id).unwrap(), Some(true));
        assert_eq!(store.toggle_task_completion(&id).unwrap(), Some(false));
        assert!(!store.task(&id).unwrap().completed);
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut store = open(MemoryStore::new());
        let before = store.tasks().to_vec();

        assert_eq!(store.toggle_task_completion("nope").unwrap(), None);
        assert_eq!(store.delete_task("nope").unwrap(), None);
        let mut ghost = before[0].clone();
        ghost.id = "nope".to_string();
        assert!(!store.update_task("nope", ghost).unwrap());
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn update_requires_matching_id() {
        let mut store = open(MemoryStore::new());
        let first = store.tasks()[0].clone();
        let other = store.tasks()[1].id.clone();

        let err = store.update_task(&other, first).unwrap_err();
        assert!(matches!(err, StoreError::IdMismatch { .. }));
    }

    #[test]
    fn tasks_must_reference_a_known_phase() {
        let mut store = open(MemoryStore::new());
        let err = store
            .create_task("Later", 9, None, Priority::Low, Category::Other)
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownPhase { phase_id: 9, phases: 5 }));
    }

    #[test]
    fn task_ids_are_unique() {
        let mut store = open(MemoryStore::new());
        let a = store.create_task("A", 0, None, Priority::Low, Category::Other).unwrap();
        store.delete_task(&a.id).unwrap();
        let b = store.create_task("A", 0, None, Priority::Low, Category::Other).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn due_date_can_be_set_and_cleared() {
        let mut store = open(MemoryStore::new());
        let id = store.tasks()[0].id.clone();
        let due = t0() + Duration::days(2);

        assert!(store.set_task_due_date(&id, Some(due)).unwrap());
        assert_eq!(store.task(&id).unwrap().due_date, Some(due));
        assert!(store.set_task_due_date(&id, None).unwrap());
        assert_eq!(store.task(&id).unwrap().due_date, None);
        assert!(!store.set_task_due_date("nope", Some(due)).unwrap());
    }

    #[test]
    fn corrupt_blobs_are_set_aside_and_reseeded() {
        let mut kv = MemoryStore::new();
        kv.set(READINGS_KEY, "{not json").unwrap();
        kv.set(TASKS_KEY, r#"[{"id":"x"}]"#).unwrap();
        let store = open(kv);

        assert_eq!(store.readings().len(), 1);
        assert_eq!(store.tasks().len(), 6);
        assert_eq!(
            store.kv().get("tankReadings.corrupt").unwrap().as_deref(),
            Some("{not json")
        );
        assert_eq!(
            store.kv().get("tankTasks.corrupt").unwrap().as_deref(),
            Some(r#"[{"id":"x"}]"#)
        );
        let saved: Vec<Task> =
            serde_json::from_str(&store.kv().get(TASKS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(saved, store.tasks());
    }

    #[test]
    fn seeded_ids_survive_reopening_after_corruption() {
        let mut kv = MemoryStore::new();
        kv.set(TASKS_KEY, "{broken").unwrap();
        let first = open(kv);
        let id = first.tasks()[0].id.clone();

        let mut second = open(first.kv().clone());
        assert_eq!(second.toggle_task_completion(&id).unwrap(), Some(true));
        assert_eq!(
            second.kv().get("tankTasks.corrupt").unwrap().as_deref(),
            Some("{broken")
        );
    }

    #[test]
    fn loaded_tasks_with_unknown_phase_land_on_the_last_phase() {
        let mut kv = MemoryStore::new();
        kv.set(
            TASKS_KEY,
            r#"[{"id":"a","text":"Stray","completed":false,"date":"2025-03-01T00:00:00Z","phaseId":99,"isCustom":true,"priority":"low","category":"other"}]"#,
        )
        .unwrap();
        let mut store = open(kv);
        assert_eq!(store.task("a").unwrap().phase_id, 4);

        let mut done = store.task("a").unwrap().clone();
        done.completed = true;
        assert!(store.update_task("a", done).unwrap());
        assert!(store.set_task_due_date("a", Some(t0())).unwrap());
    }

    #[test]
    fn update_of_missing_task_with_bad_phase_is_a_no_op() {
        let mut store = open(MemoryStore::new());
        let mut ghost = store.tasks()[0].clone();
        ghost.id = "nope".to_string();
        ghost.phase_id = 42;
        assert!(!store.update_task("nope", ghost).unwrap());
    }

    #[test]
    fn explicit_start_date_wins_over_earliest_reading() {
        let mut store = open(MemoryStore::new());
        let earliest = store.readings()[0].date;
        store.add_reading(reading(earliest - Duration::days(3))).unwrap();
        assert_eq!(store.cycle_start(), Some(earliest - Duration::days(3)));

        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        store.set_cycle_start(start).unwrap();
        assert_eq!(store.cycle_start(), Some(start));

        let reopened = open(store.kv().clone());
        assert_eq!(reopened.explicit_start_date(), Some(start));

        store.clear_cycle_start().unwrap();
        assert_eq!(store.cycle_start(), Some(earliest - Duration::days(3)));
    }

    #[test]
    fn no_readings_and_no_start_means_no_phase() {
        let mut kv = MemoryStore::new();
        kv.set(READINGS_KEY, "[]").unwrap();
        let store = open(kv);
        assert_eq!(store.cycle_start(), None);
        assert_eq!(store.current_phase(), None);
        assert_eq!(store.progress(), None);
    }

    #[test]
    fn current_phase_follows_the_clock() {
        let mut store = open(MemoryStore::new());
        store
            .set_cycle_start(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap())
            .unwrap();
        // 4.5 days in rounds up to day 5
        assert_eq!(store.current_phase().unwrap().name, "Initial Setup");

        store.clock.advance(Duration::days(10));
        assert_eq!(store.current_phase().unwrap().name, "Nitrite Phase");

        store.clock.advance(Duration::days(365));
        assert_eq!(store.current_phase_index(), Some(4));
    }

    #[test]
    fn dark_mode_round_trips() {
        let mut store = open(MemoryStore::new());
        assert!(!store.dark_mode());
        assert!(store.toggle_dark_mode().unwrap());
        assert_eq!(store.kv().get(THEME_KEY).unwrap().as_deref(), Some("true"));
        assert!(open(store.kv().clone()).dark_mode());
    }
}
