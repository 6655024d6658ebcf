use anyhow::{bail, Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

const BUILTIN_TIMETABLE: &str = include_str!("../resources/timetable.json");

pub const FALLBACK_COLOR: &str = "#9aa6b8";

/// A school day. Weekends never carry classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SchoolDay {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl SchoolDay {
    pub const ALL: [SchoolDay; 5] = [
        SchoolDay::Mon,
        SchoolDay::Tue,
        SchoolDay::Wed,
        SchoolDay::Thu,
        SchoolDay::Fri,
    ];

    /// Days after Monday, so `add_days(monday, day.index())` is the date.
    pub fn index(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            SchoolDay::Mon => "Mon",
            SchoolDay::Tue => "Tue",
            SchoolDay::Wed => "Wed",
            SchoolDay::Thu => "Thu",
            SchoolDay::Fri => "Fri",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Option<SchoolDay> {
        match weekday {
            Weekday::Mon => Some(SchoolDay::Mon),
            Weekday::Tue => Some(SchoolDay::Tue),
            Weekday::Wed => Some(SchoolDay::Wed),
            Weekday::Thu => Some(SchoolDay::Thu),
            Weekday::Fri => Some(SchoolDay::Fri),
            Weekday::Sat | Weekday::Sun => None,
        }
    }
}

impl fmt::Display for SchoolDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchoolDay {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mon" | "monday" => Ok(SchoolDay::Mon),
            "tue" | "tuesday" => Ok(SchoolDay::Tue),
            "wed" | "wednesday" => Ok(SchoolDay::Wed),
            "thu" | "thursday" => Ok(SchoolDay::Thu),
            "fri" | "friday" => Ok(SchoolDay::Fri),
            _ => bail!("Invalid day '{}'. Must be one of: Mon, Tue, Wed, Thu, Fri", s),
        }
    }
}

/// One row of the weekly timetable: a time range and what is taught in it
/// on each day. A missing or blank entry means no class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableSlot {
    pub label: String,
    #[serde(default)]
    pub by_day: BTreeMap<SchoolDay, String>,
}

impl TimetableSlot {
    pub fn subject_on(&self, day: SchoolDay) -> Option<&str> {
        self.by_day
            .get(&day)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

/// The fixed weekly pattern. Every week looks the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    pub week_name: String,
    pub slots: Vec<TimetableSlot>,
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,
}

fn default_fallback_color() -> String {
    FALLBACK_COLOR.to_string()
}

impl Timetable {
    /// The timetable compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_TIMETABLE).context("Built-in timetable is invalid")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let timetable: Timetable = serde_json::from_str(json)?;
        if timetable.slots.is_empty() {
            bail!("Timetable has no slots");
        }
        Ok(timetable)
    }

    /// Every subject taught at least once, sorted case-insensitively. Codes
    /// that differ only in case fall back to byte order.
    pub fn subjects_in_use(&self) -> Vec<String> {
        let mut subjects: Vec<String> = self.subject_set().into_iter().collect();
        subjects.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        subjects
    }

    /// The subjects in use as a set, for validation.
    pub fn subject_set(&self) -> BTreeSet<String> {
        self.slots
            .iter()
            .flat_map(|slot| SchoolDay::ALL.iter().filter_map(|day| slot.subject_on(*day)))
            .map(str::to_string)
            .collect()
    }

    pub fn color_for(&self, subject: &str) -> &str {
        self.colors
            .get(subject.trim())
            .map(String::as_str)
            .unwrap_or(self.fallback_color.as_str())
    }

    /// Whether `subject` has a class on `day` in any slot.
    pub fn slot_for(&self, day: SchoolDay, subject: &str) -> bool {
        let subject = subject.trim();
        !subject.is_empty()
            && self
                .slots
                .iter()
                .any(|slot| slot.subject_on(day) == Some(subject))
    }

    /// The day's column, one entry per slot in timetable order.
    pub fn subjects_on(&self, day: SchoolDay) -> Vec<Option<&str>> {
        self.slots.iter().map(|slot| slot.subject_on(day)).collect()
    }
}
