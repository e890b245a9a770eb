//! Small in-memory attrition tables shared by unit tests.

use std::sync::Arc;

use super::model::{CellValue, Dataset};

pub const HEADER: [&str; 17] = [
    "Age",
    "Attrition",
    "BusinessTravel",
    "Department",
    "DistanceFromHome",
    "EducationField",
    "EmployeeNumber",
    "Gender",
    "JobRole",
    "JobSatisfaction",
    "MonthlyIncome",
    "OverTime",
    "TotalWorkingYears",
    "WorkLifeBalance",
    "YearsAtCompany",
    "YearsInCurrentRole",
    "YearsWithCurrManager",
];

pub const SAMPLE_ROWS: [[&str; 17]; 8] = [
    ["41", "Yes", "Travel_Rarely", "Sales", "1", "Life Sciences", "1", "Female", "Sales Executive", "4", "5993", "Yes", "8", "1", "6", "4", "5"],
    ["49", "No", "Travel_Frequently", "Research & Development", "8", "Life Sciences", "2", "Male", "Research Scientist", "2", "5130", "No", "10", "3", "10", "7", "7"],
    ["37", "Yes", "Travel_Rarely", "Research & Development", "2", "Other", "4", "Male", "Laboratory Technician", "3", "2090", "Yes", "7", "3", "0", "0", "0"],
    ["33", "No", "Travel_Frequently", "Research & Development", "3", "Life Sciences", "5", "Female", "Research Scientist", "3", "2909", "Yes", "8", "3", "8", "7", "0"],
    ["27", "No", "Travel_Rarely", "Sales", "2", "Medical", "7", "Male", "Sales Executive", "2", "3468", "No", "6", "3", "2", "2", "2"],
    ["32", "No", "Travel_Frequently", "Sales", "2", "Life Sciences", "8", "Male", "Sales Representative", "4", "3068", "No", "8", "2", "7", "7", "6"],
    ["59", "No", "Travel_Rarely", "Human Resources", "3", "Medical", "10", "Female", "Human Resources", "1", "2670", "Yes", "12", "2", "1", "0", "0"],
    ["30", "Yes", "Non-Travel", "Human Resources", "24", "Medical", "11", "Male", "Human Resources", "3", "2693", "No", "1", "3", "1", "0", "0"],
];

pub fn column_index(name: &str) -> usize {
    HEADER
        .iter()
        .position(|h| *h == name)
        .unwrap_or_else(|| panic!("no fixture column {name}"))
}

pub fn sample_csv() -> String {
    let mut out = HEADER.join(",");
    out.push('\n');
    for row in &SAMPLE_ROWS {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

pub fn sample_dataset() -> Arc<Dataset> {
    let rows: Vec<&[&str]> = SAMPLE_ROWS.iter().map(|r| r.as_slice()).collect();
    dataset(&HEADER, &rows)
}

/// Build a dataset from text cells; integer-looking cells become integers
/// and empty cells become null.
pub fn dataset(header: &[&str], rows: &[&[&str]]) -> Arc<Dataset> {
    let rows = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    if cell.is_empty() {
                        CellValue::Null
                    } else if let Ok(i) = cell.parse::<i64>() {
                        CellValue::Integer(i)
                    } else if let Ok(f) = cell.parse::<f64>() {
                        CellValue::Float(f)
                    } else {
                        CellValue::from(*cell)
                    }
                })
                .collect()
        })
        .collect();
    Arc::new(Dataset::from_rows(
        header.iter().map(|h| h.to_string()).collect(),
        rows,
    ))
}
