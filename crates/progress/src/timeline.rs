//! Timeline view: tasks grouped by how soon they are due.

use chrono::{DateTime, NaiveDate, TimeZone};
use okr_core::{Task, Time};
use serde::{Deserialize, Serialize};

/// Anything that may carry a due date.
pub trait Scheduled {
    /// When the item is due, if ever.
    fn due_date(&self) -> Option<Time>;
}

impl Scheduled for Task {
    fn due_date(&self) -> Option<Time> {
        self.due_date
    }
}

impl<T: Scheduled + ?Sized> Scheduled for &T {
    fn due_date(&self) -> Option<Time> {
        (**self).due_date()
    }
}

/// Named partition of a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskBucket {
    /// Due before today
    Overdue,
    /// Due today
    Today,
    /// Due tomorrow
    Tomorrow,
    /// Due within the coming week, after tomorrow
    ThisWeek,
    /// Due within the week after that
    NextWeek,
    /// Due further out
    Later,
    /// No due date
    NoDueDate,
}

impl TaskBucket {
    /// All buckets in display order.
    pub const ALL: [TaskBucket; 7] = [
        TaskBucket::Overdue,
        TaskBucket::Today,
        TaskBucket::Tomorrow,
        TaskBucket::ThisWeek,
        TaskBucket::NextWeek,
        TaskBucket::Later,
        TaskBucket::NoDueDate,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskBucket::Overdue => "overdue",
            TaskBucket::Today => "today",
            TaskBucket::Tomorrow => "tomorrow",
            TaskBucket::ThisWeek => "this_week",
            TaskBucket::NextWeek => "next_week",
            TaskBucket::Later => "later",
            TaskBucket::NoDueDate => "no_due_date",
        }
    }
}

impl std::fmt::Display for TaskBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper bounds, in days from today, of the weekly buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineWindows {
    /// Last day offset that still counts as this week
    pub this_week_days: i64,
    /// Last day offset that still counts as next week
    pub next_week_days: i64,
}

impl Default for TimelineWindows {
    fn default() -> Self {
        Self {
            this_week_days: 7,
            next_week_days: 14,
        }
    }
}

/// Tasks partitioned by bucket. Every bucket is present, possibly empty,
/// and keeps the relative order of the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskBuckets<T> {
    /// Due before today
    pub overdue: Vec<T>,
    /// Due today
    pub today: Vec<T>,
    /// Due tomorrow
    pub tomorrow: Vec<T>,
    /// Due later this week
    pub this_week: Vec<T>,
    /// Due next week
    pub next_week: Vec<T>,
    /// Due further out
    pub later: Vec<T>,
    /// Without due date
    pub no_due_date: Vec<T>,
}

impl<T> Default for TaskBuckets<T> {
    fn default() -> Self {
        Self {
            overdue: Vec::new(),
            today: Vec::new(),
            tomorrow: Vec::new(),
            this_week: Vec::new(),
            next_week: Vec::new(),
            later: Vec::new(),
            no_due_date: Vec::new(),
        }
    }
}

impl<T> TaskBuckets<T> {
    /// Items in `bucket`.
    pub fn get(&self, bucket: TaskBucket) -> &[T] {
        match bucket {
            TaskBucket::Overdue => &self.overdue,
            TaskBucket::Today => &self.today,
            TaskBucket::Tomorrow => &self.tomorrow,
            TaskBucket::ThisWeek => &self.this_week,
            TaskBucket::NextWeek => &self.next_week,
            TaskBucket::Later => &self.later,
            TaskBucket::NoDueDate => &self.no_due_date,
        }
    }

    fn get_mut(&mut self, bucket: TaskBucket) -> &mut Vec<T> {
        match bucket {
            TaskBucket::Overdue => &mut self.overdue,
            TaskBucket::Today => &mut self.today,
            TaskBucket::Tomorrow => &mut self.tomorrow,
            TaskBucket::ThisWeek => &mut self.this_week,
            TaskBucket::NextWeek => &mut self.next_week,
            TaskBucket::Later => &mut self.later,
            TaskBucket::NoDueDate => &mut self.no_due_date,
        }
    }

    /// Buckets in display order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (TaskBucket, &[T])> {
        TaskBucket::ALL.into_iter().map(move |bucket| (bucket, self.get(bucket)))
    }

    /// Total number of items across buckets.
    pub fn len(&self) -> usize {
        self.iter().map(|(_, items)| items.len()).sum()
    }

    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sorts tasks into timeline buckets relative to a reference instant.
#[derive(Debug, Clone, Default)]
pub struct TimelineBucketer {
    windows: TimelineWindows,
}

impl TimelineBucketer {
    /// Create a bucketer with the default 7/14 day windows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weekly windows.
    pub fn with_windows(mut self, windows: TimelineWindows) -> Self {
        self.windows = windows;
        self
    }

    /// Bucket for a single due date.
    ///
    /// Only calendar days are compared; `due` is viewed in `now`'s time zone.
    pub fn bucket_of<Tz: TimeZone>(&self, due: Option<Time>, now: &DateTime<Tz>) -> TaskBucket {
        let Some(due) = due else {
            return TaskBucket::NoDueDate;
        };
        let today = now.date_naive();
        let due_day = due.with_timezone(&now.timezone()).date_naive();
        self.bucket_for_day(due_day, today)
    }

    fn bucket_for_day(&self, due_day: NaiveDate, today: NaiveDate) -> TaskBucket {
        let days = (due_day - today).num_days();
        if days < 0 {
            TaskBucket::Overdue
        } else if days == 0 {
            TaskBucket::Today
        } else if days == 1 {
            TaskBucket::Tomorrow
        } else if days <= self.windows.this_week_days {
            TaskBucket::ThisWeek
        } else if days <= self.windows.next_week_days {
            TaskBucket::NextWeek
        } else {
            TaskBucket::Later
        }
    }

    /// Stable partition of `tasks` into buckets.
    pub fn bucket<I, Tz>(&self, tasks: I, now: &DateTime<Tz>) -> TaskBuckets<I::Item>
    where
        I: IntoIterator,
        I::Item: Scheduled,
        Tz: TimeZone,
    {
        let mut buckets = TaskBuckets::default();
        for task in tasks {
            let bucket = self.bucket_of(task.due_date(), now);
            buckets.get_mut(bucket).push(task);
        }
        buckets
    }
}

/// Stable partition of `tasks` with the default windows.
///
/// Pass `&tasks` to bucket references, or an owned `Vec` to move the tasks.
pub fn bucket_tasks<I, Tz>(tasks: I, now: &DateTime<Tz>) -> TaskBuckets<I::Item>
where
    I: IntoIterator,
    I::Item: Scheduled,
    Tz: TimeZone,
{
    TimelineBucketer::default().bucket(tasks, now)
}
