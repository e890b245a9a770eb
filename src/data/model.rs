use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Well-known column names
// ---------------------------------------------------------------------------

/// Column names the dashboard reads directly.
pub mod columns {
    pub const AGE: &str = "Age";
    pub const ATTRITION: &str = "Attrition";
    pub const BUSINESS_TRAVEL: &str = "BusinessTravel";
    pub const DEPARTMENT: &str = "Department";
    pub const DISTANCE_FROM_HOME: &str = "DistanceFromHome";
    pub const EDUCATION_FIELD: &str = "EducationField";
    pub const GENDER: &str = "Gender";
    pub const JOB_ROLE: &str = "JobRole";
    pub const JOB_SATISFACTION: &str = "JobSatisfaction";
    pub const MONTHLY_INCOME: &str = "MonthlyIncome";
    pub const OVER_TIME: &str = "OverTime";
    pub const TOTAL_WORKING_YEARS: &str = "TotalWorkingYears";
    pub const WORK_LIFE_BALANCE: &str = "WorkLifeBalance";
    pub const YEARS_AT_COMPANY: &str = "YearsAtCompany";
    pub const YEARS_IN_CURRENT_ROLE: &str = "YearsInCurrentRole";
    pub const YEARS_WITH_CURR_MANAGER: &str = "YearsWithCurrManager";

    /// Every column an input file must provide.
    pub const REQUIRED: [&str; 16] = [
        DEPARTMENT,
        GENDER,
        EDUCATION_FIELD,
        JOB_ROLE,
        OVER_TIME,
        BUSINESS_TRAVEL,
        DISTANCE_FROM_HOME,
        MONTHLY_INCOME,
        JOB_SATISFACTION,
        WORK_LIFE_BALANCE,
        TOTAL_WORKING_YEARS,
        YEARS_AT_COMPANY,
        YEARS_IN_CURRENT_ROLE,
        YEARS_WITH_CURR_MANAGER,
        AGE,
        ATTRITION,
    ];

    /// Attrition label for employees who left.
    pub const ATTRITION_YES: &str = "Yes";
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common dataframe dtypes.
/// Used as a key in `BTreeSet` / `BTreeMap`, so it must be `Ord`.
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

pub static NULL: CellValue = CellValue::Null;

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl CellValue {
    /// Interpret the value as an `f64` for numeric charts.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Convert the value to the representation used by a column of `kind`.
    pub fn coerce(self, kind: ColumnKind) -> CellValue {
        match (kind, self) {
            (_, CellValue::Null) => CellValue::Null,
            (ColumnKind::Float, CellValue::Integer(i)) => CellValue::Float(i as f64),
            (ColumnKind::Text, CellValue::Text(s)) => CellValue::Text(s),
            (ColumnKind::Text, other) => CellValue::Text(other.to_string()),
            (_, other) => other,
        }
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Semantic type of a column, fixed at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
}

impl ColumnKind {
    /// Whether the column takes part in arithmetic and correlation.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    /// Infer the narrowest kind that holds every non-null value.
    ///
    /// A column without any non-null value is treated as text.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> ColumnKind {
        let mut kind: Option<ColumnKind> = None;
        for value in values {
            let this = match value {
                CellValue::Null => continue,
                CellValue::Integer(_) => ColumnKind::Integer,
                CellValue::Float(_) => ColumnKind::Float,
                CellValue::Bool(_) => ColumnKind::Boolean,
                CellValue::Text(_) => return ColumnKind::Text,
            };
            kind = Some(match (kind, this) {
                (None, k) => k,
                (Some(a), b) if a == b => a,
                (Some(ColumnKind::Integer), ColumnKind::Float)
                | (Some(ColumnKind::Float), ColumnKind::Integer) => ColumnKind::Float,
                _ => return ColumnKind::Text,
            });
        }
        kind.unwrap_or(ColumnKind::Text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

/// Handle to a column of a specific [`Dataset`].
///
/// Only obtainable from the dataset itself, so a picker built from
/// [`Dataset::column_ids`] can never name a column that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnId(usize);

impl ColumnId {
    pub fn index(self) -> usize {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single employee observation, one cell per schema column.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub cells: Vec<CellValue>,
}

impl Record {
    pub fn get(&self, column: ColumnId) -> &CellValue {
        self.cells.get(column.0).unwrap_or(&NULL)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed per-column value sets.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<ColumnSpec>,
    records: Vec<Record>,
    /// For each column the sorted set of observed values.
    unique_values: Vec<BTreeSet<CellValue>>,
}

impl Dataset {
    /// Build the dataset and its column indices.
    ///
    /// Records shorter than the schema are padded with nulls.
    pub fn new(columns: Vec<ColumnSpec>, mut records: Vec<Record>) -> Self {
        let mut unique_values = vec![BTreeSet::new(); columns.len()];
        for record in &mut records {
            record.cells.resize(columns.len(), CellValue::Null);
            for (set, value) in unique_values.iter_mut().zip(&record.cells) {
                set.insert(value.clone());
            }
        }
        Dataset {
            columns,
            records,
            unique_values,
        }
    }

    /// Build a dataset from untyped rows, inferring each column's kind.
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let kinds: Vec<ColumnKind> = (0..names.len())
            .map(|i| ColumnKind::infer(rows.iter().filter_map(|r| r.get(i))))
            .collect();
        let columns = names
            .into_iter()
            .zip(&kinds)
            .map(|(name, &kind)| ColumnSpec { name, kind })
            .collect();
        let records = rows
            .into_iter()
            .map(|row| Record {
                cells: row
                    .into_iter()
                    .zip(&kinds)
                    .map(|(v, &k)| v.coerce(k))
                    .collect(),
            })
            .collect();
        Dataset::new(columns, records)
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn column(&self, id: ColumnId) -> &ColumnSpec {
        &self.columns[id.0]
    }

    /// Look up a column by name.
    pub fn column_id(&self, name: &str) -> Option<ColumnId> {
        self.columns.iter().position(|c| c.name == name).map(ColumnId)
    }

    /// All columns in schema order.
    pub fn column_ids(&self) -> impl Iterator<Item = ColumnId> + '_ {
        (0..self.columns.len()).map(ColumnId)
    }

    pub fn numeric_column_ids(&self) -> impl Iterator<Item = ColumnId> + '_ {
        self.column_ids().filter(|id| self.column(*id).kind.is_numeric())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, row: usize) -> &Record {
        &self.records[row]
    }

    pub fn unique_values(&self, id: ColumnId) -> &BTreeSet<CellValue> {
        &self.unique_values[id.0]
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_widens_integers_to_float() {
        let values = [CellValue::Integer(1), CellValue::Null, CellValue::Float(2.5)];
        assert_eq!(ColumnKind::infer(&values), ColumnKind::Float);
    }

    #[test]
    fn infer_falls_back_to_text_on_mixed_values() {
        let values = [CellValue::Integer(1), CellValue::Bool(true)];
        assert_eq!(ColumnKind::infer(&values), ColumnKind::Text);
        assert_eq!(ColumnKind::infer(&[CellValue::Null]), ColumnKind::Text);
    }

    #[test]
    fn from_rows_coerces_cells_to_column_kind() {
        let ds = Dataset::from_rows(
            vec!["a".into(), "b".into()],
            vec![
                vec![CellValue::Integer(1), CellValue::Integer(7)],
                vec![CellValue::Float(0.5), CellValue::from("x")],
            ],
        );
        assert_eq!(ds.columns()[0].kind, ColumnKind::Float);
        assert_eq!(ds.columns()[1].kind, ColumnKind::Text);
        assert_eq!(ds.record(0).cells[0], CellValue::Float(1.0));
        assert_eq!(ds.record(0).cells[1], CellValue::from("7"));
    }

    #[test]
    fn unique_values_are_sorted_per_column() {
        let ds = Dataset::from_rows(
            vec!["Department".into()],
            vec![
                vec![CellValue::from("Sales")],
                vec![CellValue::from("HR")],
                vec![CellValue::from("Sales")],
            ],
        );
        let id = ds.column_id("Department").unwrap();
        let values: Vec<_> = ds.unique_values(id).iter().cloned().collect();
        assert_eq!(values, vec![CellValue::from("HR"), CellValue::from("Sales")]);
        assert!(ds.column_id("Missing").is_none());
    }

    #[test]
    fn short_records_are_padded_with_null() {
        let ds = Dataset::new(
            vec![
                ColumnSpec { name: "a".into(), kind: ColumnKind::Integer },
                ColumnSpec { name: "b".into(), kind: ColumnKind::Text },
            ],
            vec![Record { cells: vec![CellValue::Integer(3)] }],
        );
        let b = ds.column_id("b").unwrap();
        assert!(ds.record(0).get(b).is_null());
    }
}
