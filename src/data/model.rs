use std::fmt;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Column names of the OpenIPF / OpenPowerlifting export
// ---------------------------------------------------------------------------

pub const COL_NAME: &str = "Name";
pub const COL_SEX: &str = "Sex";
pub const COL_DATE: &str = "Date";
pub const COL_FEDERATION: &str = "Federation";
pub const COL_WEIGHT_CLASS: &str = "WeightClassKg";
pub const COL_SQUAT: &str = "Best3SquatKg";
pub const COL_BENCH: &str = "Best3BenchKg";
pub const COL_DEADLIFT: &str = "Best3DeadliftKg";

/// Columns without which a file cannot be loaded at all.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_NAME, COL_DATE, COL_FEDERATION, COL_WEIGHT_CLASS];

// ---------------------------------------------------------------------------
// Lift – the three ranked numeric columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lift {
    Squat,
    Bench,
    Deadlift,
}

impl Lift {
    pub const ALL: [Lift; 3] = [Lift::Squat, Lift::Bench, Lift::Deadlift];

    pub fn column(self) -> &'static str {
        match self {
            Lift::Squat => COL_SQUAT,
            Lift::Bench => COL_BENCH,
            Lift::Deadlift => COL_DEADLIFT,
        }
    }

    /// Human-readable lift name used in chart titles.
    pub fn label(self) -> &'static str {
        match self {
            Lift::Squat => "Squat",
            Lift::Bench => "Bench Press",
            Lift::Deadlift => "Deadlift",
        }
    }
}

impl fmt::Display for Lift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Category – columns that can be counted
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Sex,
    Federation,
    WeightClass,
}

impl Category {
    pub fn column(self) -> &'static str {
        match self {
            Category::Sex => COL_SEX,
            Category::Federation => COL_FEDERATION,
            Category::WeightClass => COL_WEIGHT_CLASS,
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnPresence – which optional columns the source file carried
// ---------------------------------------------------------------------------

/// Schema capabilities resolved once at load time.
///
/// Required columns are always present (the loader rejects files without
/// them), so only the optional ones are tracked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPresence {
    pub sex: bool,
    pub squat: bool,
    pub bench: bool,
    pub deadlift: bool,
}

impl Default for ColumnPresence {
    fn default() -> Self {
        Self::all()
    }
}

impl ColumnPresence {
    pub fn all() -> Self {
        Self {
            sex: true,
            squat: true,
            bench: true,
            deadlift: true,
        }
    }

    /// Resolve presence from a list of header names.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let has = |name: &str| headers.iter().any(|h| h.as_ref() == name);
        Self {
            sex: has(COL_SEX),
            squat: has(COL_SQUAT),
            bench: has(COL_BENCH),
            deadlift: has(COL_DEADLIFT),
        }
    }

    pub fn has_lift(&self, lift: Lift) -> bool {
        match lift {
            Lift::Squat => self.squat,
            Lift::Bench => self.bench,
            Lift::Deadlift => self.deadlift,
        }
    }

    pub fn has_category(&self, category: Category) -> bool {
        match category {
            Category::Sex => self.sex,
            Category::Federation | Category::WeightClass => true,
        }
    }
}

// ---------------------------------------------------------------------------
// LiftResult – one row of the results table
// ---------------------------------------------------------------------------

/// One competitor's entry in one competition.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftResult {
    pub name: String,
    /// Empty when the cell is blank or the file has no `Sex` column.
    pub sex: String,
    pub date: NaiveDate,
    pub federation: String,
    pub weight_class: String,
    pub squat: Option<f64>,
    pub bench: Option<f64>,
    pub deadlift: Option<f64>,
}

impl LiftResult {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn best(&self, lift: Lift) -> Option<f64> {
        match lift {
            Lift::Squat => self.squat,
            Lift::Bench => self.bench,
            Lift::Deadlift => self.deadlift,
        }
    }

    pub fn category(&self, category: Category) -> &str {
        match category {
            Category::Sex => &self.sex,
            Category::Federation => &self.federation,
            Category::WeightClass => &self.weight_class,
        }
    }
}

// ---------------------------------------------------------------------------
// LiftTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded table. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct LiftTable {
    rows: Vec<LiftResult>,
    columns: ColumnPresence,
}

impl LiftTable {
    pub fn new(rows: Vec<LiftResult>, columns: ColumnPresence) -> Self {
        Self { rows, columns }
    }

    pub fn rows(&self) -> &[LiftResult] {
        &self.rows
    }

    pub fn columns(&self) -> ColumnPresence {
        self.columns
    }

    /// Number of result rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilteredView – a borrowed subset of a LiftTable
// ---------------------------------------------------------------------------

/// Rows selected from a [`LiftTable`], carrying the table's schema along.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    pub rows: Vec<&'a LiftResult>,
    pub columns: ColumnPresence,
}

impl<'a> FilteredView<'a> {
    /// A view over every row of the table.
    pub fn whole(table: &'a LiftTable) -> Self {
        Self {
            rows: table.rows().iter().collect(),
            columns: table.columns(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_from_headers_tracks_optional_columns() {
        let headers = ["Name", "Date", "Federation", "WeightClassKg", "Best3SquatKg"];
        let presence = ColumnPresence::from_headers(&headers);
        assert!(!presence.sex);
        assert!(presence.has_lift(Lift::Squat));
        assert!(!presence.has_lift(Lift::Bench));
        assert!(!presence.has_lift(Lift::Deadlift));
        assert!(presence.has_category(Category::Federation));
        assert!(!presence.has_category(Category::Sex));
    }

    #[test]
    fn row_accessors() {
        let row = LiftResult {
            name: "A".into(),
            sex: "F".into(),
            date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            federation: "IPF".into(),
            weight_class: "63".into(),
            squat: Some(150.0),
            bench: None,
            deadlift: Some(180.5),
        };
        assert_eq!(row.year(), 2023);
        assert_eq!(row.best(Lift::Squat), Some(150.0));
        assert_eq!(row.best(Lift::Bench), None);
        assert_eq!(row.category(Category::WeightClass), "63");
        assert_eq!(Lift::Deadlift.column(), "Best3DeadliftKg");
    }
}
