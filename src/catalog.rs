//! Static schedule catalogs: the period slots of a school day, the
//! weekdays of the grid, and the subject color palette.
//!
//! These are fixed configuration consumed by the CLI layer. The store
//! itself never validates against them, except that subject creation
//! cycles through the palette.

/// One slot in the daily timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub id: u32,
    pub name: &'static str,
    pub start_time: &'static str,
    pub end_time: &'static str,
    /// Rendered at half height in grid views.
    pub is_half_height: bool,
    /// Break slots cannot hold a class.
    pub is_break: bool,
    /// The free-text memo row at the bottom of the grid.
    pub is_memo: bool,
}

/// The daily timetable: morning study, six teaching periods, two breaks
/// and the memo row.
pub static PERIODS: [Period; 10] = [
    Period { id: 0, name: "Morning study", start_time: "08:15", end_time: "08:45", is_half_height: true, is_break: false, is_memo: false },
    Period { id: 1, name: "Period 1", start_time: "08:50", end_time: "09:40", is_half_height: false, is_break: false, is_memo: false },
    Period { id: 2, name: "Period 2", start_time: "09:50", end_time: "10:40", is_half_height: false, is_break: false, is_memo: false },
    Period { id: 3, name: "Break", start_time: "10:40", end_time: "11:00", is_half_height: true, is_break: true, is_memo: false },
    Period { id: 4, name: "Period 3", start_time: "11:00", end_time: "11:50", is_half_height: false, is_break: false, is_memo: false },
    Period { id: 5, name: "Period 4", start_time: "12:00", end_time: "12:50", is_half_height: false, is_break: false, is_memo: false },
    Period { id: 6, name: "Lunch break", start_time: "12:50", end_time: "13:30", is_half_height: true, is_break: true, is_memo: false },
    Period { id: 7, name: "Period 5", start_time: "13:30", end_time: "14:20", is_half_height: false, is_break: false, is_memo: false },
    Period { id: 8, name: "Period 6", start_time: "14:30", end_time: "15:20", is_half_height: false, is_break: false, is_memo: false },
    Period { id: 9, name: "Memo", start_time: "", end_time: "", is_half_height: false, is_break: false, is_memo: true },
];

/// Weekdays shown on the grid. Sunday is excluded by design.
pub static DAYS: [&str; 6] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A named palette entry. `name` is what gets stored on a Subject; `value`
/// is the display hint for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColor {
    pub name: &'static str,
    pub value: &'static str,
}

/// Subject colors, cycled in creation order by the store.
pub static THEME_COLORS: [ThemeColor; 3] = [
    ThemeColor { name: "primary", value: "blue" },
    ThemeColor { name: "secondary", value: "green" },
    ThemeColor { name: "danger", value: "red" },
];

impl Period {
    /// A period that can hold a class template.
    pub fn is_teachable(&self) -> bool {
        !self.is_break && !self.is_memo
    }
}

/// Look up a period by id.
pub fn period_by_id(id: u32) -> Option<&'static Period> {
    PERIODS.iter().find(|p| p.id == id)
}

/// Ids of the periods that accept a class template.
pub fn class_period_ids() -> impl Iterator<Item = u32> {
    PERIODS.iter().filter(|p| p.is_teachable()).map(|p| p.id)
}

/// Resolve a weekday name case-insensitively to its canonical form.
pub fn canonical_day(input: &str) -> Option<&'static str> {
    let input = input.trim();
    DAYS.iter()
        .find(|d| d.eq_ignore_ascii_case(input))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_weekdays_without_sunday() {
        assert_eq!(DAYS.len(), 6);
        assert!(!DAYS.contains(&"Sunday"));
    }

    #[test]
    fn teachable_periods_exclude_breaks_and_memo_row() {
        let ids: Vec<u32> = class_period_ids().collect();
        assert_eq!(ids, vec![0, 1, 2, 4, 5, 7, 8]);
    }

    #[test]
    fn palette_has_three_entries() {
        assert_eq!(THEME_COLORS.len(), 3);
    }

    #[test]
    fn day_resolution_is_case_insensitive() {
        assert_eq!(canonical_day("monday"), Some("Monday"));
        assert_eq!(canonical_day("  SATURDAY "), Some("Saturday"));
        assert_eq!(canonical_day("Sunday"), None);
    }
}
