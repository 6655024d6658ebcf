//! The two-week rolling board and the todo list beside it.
//!
//! Nothing here mutates or truncates. Buckets come back complete, and how
//! many entries a cell shows is up to whoever draws it.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::dates::{add_days, checked_add_days, days_between, format, monday_of};
use crate::models::Assignment;

pub const WINDOW_DAYS: i64 = 14;

pub type DayBuckets = BTreeMap<NaiveDate, Vec<Assignment>>;

/// Fourteen days starting on a Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardWindow {
    start: NaiveDate,
}

/// One day of the board as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_focused: bool,
    pub assignments: Vec<Assignment>,
}

impl BoardWindow {
    /// `start` must already be a Monday; it is not re-aligned.
    pub fn new(start: NaiveDate) -> Self {
        Self { start }
    }

    /// The window a fresh session opens on: this week and next.
    pub fn current(today: NaiveDate) -> Self {
        Self::new(monday_of(today))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        add_days(self.start, WINDOW_DAYS - 1)
    }

    /// Moves the window by whole weeks. `None` when any of its days would
    /// fall outside the calendar.
    pub fn shift(self, weeks: i64) -> Option<Self> {
        let start = checked_add_days(self.start, weeks.checked_mul(7)?)?;
        checked_add_days(start, WINDOW_DAYS - 1)?;
        Some(Self::new(start))
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        (0..WINDOW_DAYS).map(|i| add_days(self.start, i)).collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end()
    }

    pub fn label(&self) -> String {
        format!("{} - {}", format(self.start), format(self.end()))
    }

    /// Lays the buckets out over the window's days.
    pub fn cells(
        &self,
        buckets: &DayBuckets,
        today: NaiveDate,
        focus: Option<NaiveDate>,
    ) -> Vec<BoardCell> {
        self.days()
            .into_iter()
            .map(|date| BoardCell {
                date,
                is_today: date == today,
                is_focused: focus == Some(date),
                assignments: buckets.get(&date).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

/// Groups open assignments by due date, keeping store order inside each
/// day. Dates outside any window are grouped too.
pub fn bucket_by_day(assignments: &[Assignment]) -> DayBuckets {
    let mut buckets = DayBuckets::new();
    for a in assignments.iter().filter(|a| !a.done) {
        buckets.entry(a.due).or_default().push(a.clone());
    }
    buckets
}

/// Pinned first, then earliest due, then oldest. A record with no creation
/// time sorts before any that has one.
pub fn list_order(a: &Assignment, b: &Assignment) -> Ordering {
    b.pinned
        .cmp(&a.pinned)
        .then_with(|| a.due.cmp(&b.due))
        .then_with(|| a.created_at.cmp(&b.created_at))
}

pub fn order_list(assignments: &[Assignment]) -> Vec<Assignment> {
    let mut ordered = assignments.to_vec();
    ordered.sort_by(list_order);
    ordered
}

/// Everything not done, optionally narrowed to one due date. Not bounded by
/// the board window.
pub fn filter_upcoming(ordered: &[Assignment], focus: Option<NaiveDate>) -> Vec<Assignment> {
    ordered
        .iter()
        .filter(|a| !a.done)
        .filter(|a| focus.map_or(true, |day| a.due == day))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Overdue,
    Today,
    Tomorrow,
    InDays(i64),
}

impl fmt::Display for RelativeDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeDay::Overdue => write!(f, "Overdue"),
            RelativeDay::Today => write!(f, "Today"),
            RelativeDay::Tomorrow => write!(f, "Tomorrow"),
            RelativeDay::InDays(n) => write!(f, "{} days", n),
        }
    }
}

pub fn relative_label(due: NaiveDate, today: NaiveDate) -> RelativeDay {
    match days_between(today, due) {
        n if n < 0 => RelativeDay::Overdue,
        0 => RelativeDay::Today,
        1 => RelativeDay::Tomorrow,
        n => RelativeDay::InDays(n),
    }
}

/// Selecting the focused day again clears the focus.
pub fn toggle_focus(current: Option<NaiveDate>, clicked: NaiveDate) -> Option<NaiveDate> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

pub fn focus_label(focus: Option<NaiveDate>) -> String {
    match focus {
        Some(day) => format!("Showing: {}", format(day)),
        None => "Showing: all upcoming".to_string(),
    }
}
