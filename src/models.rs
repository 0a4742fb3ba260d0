use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, colored category of instruction (e.g. a school course).
///
/// `color` is assigned from the fixed palette at creation time and never
/// changes afterwards; only the name can be edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// A sub-topic within a subject, with an advisory required-period count.
///
/// `required_periods` is metadata for planning; nothing checks it against
/// the schedule grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub subject_id: String,
    pub name: String,
    pub required_periods: u32,
}

/// A recurring weekly assignment: on `day`, in period `period_id`, this
/// subject (and optionally this unit) is taught. Independent of any
/// calendar date. At most one exists per `(day, period_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTemplate {
    pub id: String,
    pub day: String,
    pub period_id: u32,
    pub subject_id: String,
    pub unit_id: Option<String>,
}

/// A dated class occurrence (`date` is YYYY-MM-DD).
///
/// Persisted for format compatibility but never populated: no mutator or
/// query touches this collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: String,
    pub date: String,
    pub day: String,
    pub period_id: u32,
    pub subject_id: String,
    pub unit_id: Option<String>,
}

/// Free-text note attached to a single weekday. At most one per `day`;
/// empty content is a valid, distinct state from "no memo yet".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: String,
    pub day: String,
    pub content: String,
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

impl Subject {
    pub fn new(name: String, color: String) -> Self {
        Self {
            id: fresh_id(),
            name,
            color,
        }
    }
}

impl Unit {
    pub fn new(subject_id: String, name: String, required_periods: u32) -> Self {
        Self {
            id: fresh_id(),
            subject_id,
            name,
            required_periods,
        }
    }
}

impl ClassTemplate {
    pub fn new(day: String, period_id: u32, subject_id: String, unit_id: Option<String>) -> Self {
        Self {
            id: fresh_id(),
            day,
            period_id,
            subject_id,
            unit_id,
        }
    }
}

impl Memo {
    pub fn new(day: String, content: String) -> Self {
        Self {
            id: fresh_id(),
            day,
            content,
        }
    }
}
