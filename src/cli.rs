use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::catalog::{self, DAYS, PERIODS};
use crate::storage::{Storage, StorageError};
use crate::store::{Mutation, PlannerStore};
use crate::utils;

#[derive(Parser)]
#[command(name = "weekplan")]
#[command(about = "Weekly class-schedule planner - subjects, units, classes and memos")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage subjects
    Subject {
        #[command(subcommand)]
        command: SubjectCommands,
    },
    /// Manage units within a subject
    Unit {
        #[command(subcommand)]
        command: UnitCommands,
    },
    /// Manage the recurring weekly class grid
    Class {
        #[command(subcommand)]
        command: ClassCommands,
    },
    /// Manage per-weekday memos
    Memo {
        #[command(subcommand)]
        command: MemoCommands,
    },
    /// Print the weekly schedule grid
    Schedule {
        /// Show the week containing this date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SubjectCommands {
    /// Add a new subject (color is assigned automatically)
    Add {
        /// Subject name
        name: String,
    },
    /// Rename a subject
    Rename {
        /// Subject name or id
        subject: String,
        /// New name
        name: String,
    },
    /// Delete a subject and everything scheduled for it
    Delete {
        /// Subject name or id
        subject: String,
    },
    /// List all subjects
    List,
}

#[derive(Subcommand)]
pub enum UnitCommands {
    /// Add a unit to a subject
    Add {
        /// Subject name or id
        subject: String,
        /// Unit name
        name: String,
        /// Number of periods the unit needs
        periods: u32,
    },
    /// Update a unit's name and period count
    Update {
        /// Unit name or id
        unit: String,
        /// New name
        name: String,
        /// Number of periods the unit needs
        periods: u32,
    },
    /// Delete a unit (scheduled classes keep their subject)
    Delete {
        /// Unit name or id
        unit: String,
    },
    /// List units, optionally for one subject
    List {
        /// Restrict to one subject (name or id)
        #[arg(long)]
        subject: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ClassCommands {
    /// Assign a subject (and optionally a unit) to a weekday/period slot
    Set {
        /// Weekday (Monday through Saturday)
        day: String,
        /// Period id
        period: u32,
        /// Subject name or id
        subject: String,
        /// Unit name or id within the subject
        #[arg(long)]
        unit: Option<String>,
    },
    /// Clear a weekday/period slot
    Clear {
        /// Weekday (Monday through Saturday)
        day: String,
        /// Period id
        period: u32,
    },
}

#[derive(Subcommand)]
pub enum MemoCommands {
    /// Set the memo for a weekday (overwrites any previous memo)
    Set {
        /// Weekday (Monday through Saturday)
        day: String,
        /// Memo text (empty clears the text but keeps the memo)
        content: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error("Unknown weekday '{0}' (expected Monday through Saturday)")]
    UnknownDay(String),
    #[error("Unknown period id {0}")]
    UnknownPeriod(u32),
    #[error("Period {0} ({1}) cannot hold a class")]
    PeriodNotTeachable(u32, String),
    #[error("No subject matches '{0}'")]
    UnknownSubject(String),
    #[error("No unit matches '{0}'")]
    UnknownUnit(String),
    #[error("Invalid date '{0}': {1} (expected YYYY-MM-DD)")]
    InvalidDate(String, chrono::ParseError),
}

/// Resolve a subject reference (id or case-insensitive name) to its id.
///
/// The store does not validate referenced ids; existence checks live
/// here, on the calling side.
fn resolve_subject_id<S: Storage>(
    store: &PlannerStore<S>,
    reference: &str,
) -> Result<String, CliError> {
    if let Some(subject) = store.subject_by_id(reference) {
        return Ok(subject.id.clone());
    }
    store
        .subjects()
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(reference.trim()))
        .map(|s| s.id.clone())
        .ok_or_else(|| CliError::UnknownSubject(reference.to_string()))
}

/// Resolve a unit reference (id or case-insensitive name) to its id,
/// optionally restricted to one subject.
fn resolve_unit_id<S: Storage>(
    store: &PlannerStore<S>,
    subject_id: Option<&str>,
    reference: &str,
) -> Result<String, CliError> {
    let candidates = store.units().iter().filter(|u| match subject_id {
        Some(sid) => u.subject_id == sid,
        None => true,
    });
    let mut by_name = None;
    for unit in candidates {
        if unit.id == reference {
            return Ok(unit.id.clone());
        }
        if by_name.is_none() && unit.name.eq_ignore_ascii_case(reference.trim()) {
            by_name = Some(unit.id.clone());
        }
    }
    by_name.ok_or_else(|| CliError::UnknownUnit(reference.to_string()))
}

fn resolve_day(day: &str) -> Result<&'static str, CliError> {
    catalog::canonical_day(day).ok_or_else(|| CliError::UnknownDay(day.to_string()))
}

/// Validate that a period id exists and can hold a class. The break and
/// memo rows are fixed grid furniture, not schedulable slots.
fn resolve_class_period(period_id: u32) -> Result<&'static catalog::Period, CliError> {
    let period = catalog::period_by_id(period_id).ok_or(CliError::UnknownPeriod(period_id))?;
    if !period.is_teachable() {
        return Err(CliError::PeriodNotTeachable(period.id, period.name.to_string()));
    }
    Ok(period)
}

pub fn handle_subject_command<S: Storage>(
    command: SubjectCommands,
    store: &mut PlannerStore<S>,
) -> Result<(), CliError> {
    match command {
        SubjectCommands::Add { name } => {
            match store.add_subject(&name)? {
                Mutation::Applied => {
                    let subject = store
                        .subjects()
                        .last()
                        .expect("subject was just appended");
                    println!(
                        "Subject '{}' created (color: {}, id: {})",
                        subject.name, subject.color, subject.id
                    );
                }
                Mutation::Rejected => println!("Subject name cannot be empty; nothing created"),
            }
            Ok(())
        }
        SubjectCommands::Rename { subject, name } => {
            let id = resolve_subject_id(store, &subject)?;
            match store.update_subject(&id, &name)? {
                Mutation::Applied => println!("Subject renamed to '{}'", name.trim()),
                Mutation::Rejected => println!("Subject name cannot be empty; nothing changed"),
            }
            Ok(())
        }
        SubjectCommands::Delete { subject } => {
            let id = resolve_subject_id(store, &subject)?;
            let name = store
                .subject_by_id(&id)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            let unit_count = store.units_by_subject_id(&id).len();
            let class_count = store
                .class_templates()
                .iter()
                .filter(|t| t.subject_id == id)
                .count();
            store.delete_subject(&id)?;
            println!(
                "Deleted subject '{}' ({} unit(s) and {} scheduled class(es) removed)",
                name, unit_count, class_count
            );
            Ok(())
        }
        SubjectCommands::List => {
            if store.subjects().is_empty() {
                println!("No subjects yet");
                return Ok(());
            }
            for subject in store.subjects() {
                let unit_count = store.units_by_subject_id(&subject.id).len();
                println!(
                    "{}  [{}]  {} unit(s)  (id: {})",
                    subject.name, subject.color, unit_count, subject.id
                );
            }
            Ok(())
        }
    }
}

pub fn handle_unit_command<S: Storage>(
    command: UnitCommands,
    store: &mut PlannerStore<S>,
) -> Result<(), CliError> {
    match command {
        UnitCommands::Add {
            subject,
            name,
            periods,
        } => {
            let subject_id = resolve_subject_id(store, &subject)?;
            match store.add_unit(&subject_id, &name, periods)? {
                Mutation::Applied => {
                    let unit = store.units().last().expect("unit was just appended");
                    println!(
                        "Unit '{}' added ({} period(s), id: {})",
                        unit.name, unit.required_periods, unit.id
                    );
                }
                Mutation::Rejected => {
                    println!("Unit needs a non-empty name and a positive period count")
                }
            }
            Ok(())
        }
        UnitCommands::Update {
            unit,
            name,
            periods,
        } => {
            let id = resolve_unit_id(store, None, &unit)?;
            match store.update_unit(&id, &name, periods)? {
                Mutation::Applied => {
                    println!("Unit updated: '{}' ({} period(s))", name.trim(), periods)
                }
                Mutation::Rejected => {
                    println!("Unit needs a non-empty name and a positive period count")
                }
            }
            Ok(())
        }
        UnitCommands::Delete { unit } => {
            let id = resolve_unit_id(store, None, &unit)?;
            let cleared = store
                .class_templates()
                .iter()
                .filter(|t| t.unit_id.as_deref() == Some(id.as_str()))
                .count();
            store.delete_unit(&id)?;
            println!(
                "Unit deleted ({} scheduled class(es) kept without a unit)",
                cleared
            );
            Ok(())
        }
        UnitCommands::List { subject } => {
            let subject_id = subject
                .as_deref()
                .map(|s| resolve_subject_id(store, s))
                .transpose()?;
            let mut printed = false;
            for unit in store.units() {
                if let Some(ref sid) = subject_id {
                    if unit.subject_id != *sid {
                        continue;
                    }
                }
                let subject_name = store
                    .subject_by_id(&unit.subject_id)
                    .map(|s| s.name.as_str())
                    .unwrap_or("?");
                println!(
                    "{}: {}  ({} period(s), id: {})",
                    subject_name, unit.name, unit.required_periods, unit.id
                );
                printed = true;
            }
            if !printed {
                println!("No units found");
            }
            Ok(())
        }
    }
}

pub fn handle_class_command<S: Storage>(
    command: ClassCommands,
    store: &mut PlannerStore<S>,
) -> Result<(), CliError> {
    match command {
        ClassCommands::Set {
            day,
            period,
            subject,
            unit,
        } => {
            let day = resolve_day(&day)?;
            let period = resolve_class_period(period)?;
            let subject_id = resolve_subject_id(store, &subject)?;
            let unit_id = unit
                .as_deref()
                .map(|u| resolve_unit_id(store, Some(&subject_id), u))
                .transpose()?;
            store.set_class_template(day, period.id, &subject_id, unit_id.as_deref())?;
            println!("{} {} set", day, period.name);
            Ok(())
        }
        ClassCommands::Clear { day, period } => {
            let day = resolve_day(&day)?;
            let period = resolve_class_period(period)?;
            match store.delete_class_template(day, period.id)? {
                Mutation::Applied => println!("{} {} cleared", day, period.name),
                Mutation::Rejected => println!("{} {} was already empty", day, period.name),
            }
            Ok(())
        }
    }
}

pub fn handle_memo_command<S: Storage>(
    command: MemoCommands,
    store: &mut PlannerStore<S>,
) -> Result<(), CliError> {
    match command {
        MemoCommands::Set { day, content } => {
            let day = resolve_day(&day)?;
            store.update_memo(day, &content)?;
            println!("Memo for {} saved", day);
            Ok(())
        }
    }
}

/// Print the weekly grid: one row per period, one column per weekday,
/// with the memo row at the bottom.
pub fn handle_schedule<S: Storage>(
    store: &PlannerStore<S>,
    date: Option<&str>,
) -> Result<(), CliError> {
    const CELL: usize = 18;
    let anchor = match date {
        Some(raw) => utils::parse_date(raw)
            .map_err(|e| CliError::InvalidDate(raw.to_string(), e))?,
        None => chrono::Local::now().date_naive(),
    };
    let dates = utils::week_dates(anchor);

    print!("{:<16}", "");
    for (day, date) in DAYS.iter().zip(dates.iter()) {
        print!("{:<CELL$}", format!("{} {}", day, date.format("%m/%d")));
    }
    println!();

    for period in &PERIODS {
        if period.is_memo {
            continue;
        }
        let label = if period.start_time.is_empty() {
            period.name.to_string()
        } else {
            format!("{} {}", period.name, period.start_time)
        };
        print!("{:<16}", label);
        for day in DAYS {
            let cell = if period.is_break {
                "--".to_string()
            } else {
                match store.class_template(day, period.id) {
                    Some(template) => {
                        let subject = store
                            .subject_by_id(&template.subject_id)
                            .map(|s| s.name.as_str())
                            .unwrap_or("?");
                        match template.unit_id.as_deref().and_then(|u| store.unit_by_id(u)) {
                            Some(unit) => format!("{} ({})", subject, unit.name),
                            None => subject.to_string(),
                        }
                    }
                    None => ".".to_string(),
                }
            };
            print!("{:<CELL$}", truncate(&cell, CELL - 2));
        }
        println!();
    }

    print!("{:<16}", "Memo");
    for day in DAYS {
        let memo = store.memo_for_day(day).map(|m| m.content.as_str()).unwrap_or("");
        print!("{:<CELL$}", truncate(memo, CELL - 2));
    }
    println!();
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
