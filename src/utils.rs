use chrono::{Datelike, Days, NaiveDate, Weekday};
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

fn app_name(profile: Profile) -> &'static str {
    match profile {
        Profile::Dev => "weekplan-dev",
        Profile::Prod => "weekplan",
    }
}

/// Get the configuration directory path for the app.
/// If profile is Dev, uses "weekplan-dev" instead of "weekplan".
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "weekplan", app_name(profile))
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for the app.
/// If profile is Dev, uses "weekplan-dev" instead of "weekplan".
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "weekplan", app_name(profile))
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// The Monday-through-Saturday dates of the week containing `date`.
/// Matches the schedule grid, which excludes Sunday; a Sunday input maps
/// to the following week.
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 6] {
    let monday = if date.weekday() == Weekday::Sun {
        date.checked_add_days(Days::new(1))
            .unwrap_or(date)
    } else {
        date.week(Weekday::Mon).first_day()
    };
    std::array::from_fn(|i| {
        monday
            .checked_add_days(Days::new(i as u64))
            .unwrap_or(monday)
    })
}
