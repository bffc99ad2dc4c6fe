use std::collections::{BTreeSet, HashSet};
use std::fmt;

use super::model::{FilteredView, LiftResult, LiftTable};

// ---------------------------------------------------------------------------
// Weight-class choice: a concrete class or the synthetic "all" option
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WeightClassChoice {
    /// No constraint on weight class.
    All,
    Class(String),
}

impl WeightClassChoice {
    pub fn matches(&self, weight_class: &str) -> bool {
        match self {
            WeightClassChoice::All => true,
            WeightClassChoice::Class(c) => c == weight_class,
        }
    }
}

impl fmt::Display for WeightClassChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightClassChoice::All => f.write_str("All categories"),
            WeightClassChoice::Class(c) => write!(f, "{c} kg"),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter options derived from the table
// ---------------------------------------------------------------------------

/// The values offered by the three selectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Distinct competition years, ascending.
    pub years: Vec<i32>,
    /// Distinct federations in first-seen order.
    pub federations: Vec<String>,
    /// [`WeightClassChoice::All`] followed by distinct classes in first-seen order.
    pub weight_classes: Vec<WeightClassChoice>,
}

impl FilterOptions {
    pub fn from_table(table: &LiftTable) -> Self {
        let years: BTreeSet<i32> = table.rows().iter().map(LiftResult::year).collect();

        let mut federations = Vec::new();
        let mut seen_feds = HashSet::new();
        let mut weight_classes = vec![WeightClassChoice::All];
        let mut seen_classes = HashSet::new();

        for row in table.rows() {
            if seen_feds.insert(row.federation.as_str()) {
                federations.push(row.federation.clone());
            }
            if seen_classes.insert(row.weight_class.as_str()) {
                weight_classes.push(WeightClassChoice::Class(row.weight_class.clone()));
            }
        }

        Self {
            years: years.into_iter().collect(),
            federations,
            weight_classes,
        }
    }
}

// ---------------------------------------------------------------------------
// Selection: the current (year, federation, weight class) predicate
// ---------------------------------------------------------------------------

/// One immutable filter configuration. Changing a selector produces a new
/// value via the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub year: i32,
    pub federation: String,
    pub weight_class: WeightClassChoice,
}

impl Selection {
    pub fn new(year: i32, federation: impl Into<String>, weight_class: WeightClassChoice) -> Self {
        Self {
            year,
            federation: federation.into(),
            weight_class,
        }
    }

    /// First year, first federation, all weight classes. `None` for an empty table.
    pub fn initial(options: &FilterOptions) -> Option<Self> {
        let year = *options.years.first()?;
        let federation = options.federations.first()?.clone();
        Some(Self::new(year, federation, WeightClassChoice::All))
    }

    pub fn with_year(&self, year: i32) -> Self {
        Self {
            year,
            ..self.clone()
        }
    }

    pub fn with_federation(&self, federation: impl Into<String>) -> Self {
        Self {
            federation: federation.into(),
            ..self.clone()
        }
    }

    pub fn with_weight_class(&self, weight_class: WeightClassChoice) -> Self {
        Self {
            weight_class,
            ..self.clone()
        }
    }

    /// Exact, case-sensitive match on federation and weight class; integer
    /// match on the year of the competition date.
    pub fn matches(&self, row: &LiftResult) -> bool {
        row.year() == self.year
            && row.federation == self.federation
            && self.weight_class.matches(&row.weight_class)
    }
}

/// Return the rows that pass `selection`, preserving their order.
///
/// Takes any sequence of row references so a filtered result can itself be
/// filtered again.
pub fn filter_rows<'a, I>(rows: I, selection: &Selection) -> Vec<&'a LiftResult>
where
    I: IntoIterator<Item = &'a LiftResult>,
{
    rows.into_iter().filter(|row| selection.matches(row)).collect()
}

/// Apply `selection` to the whole table.
pub fn filter_table<'a>(table: &'a LiftTable, selection: &Selection) -> FilteredView<'a> {
    FilteredView {
        rows: filter_rows(table.rows(), selection),
        columns: table.columns(),
    }
}
