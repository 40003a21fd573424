use super::repository::StoredGrade;
use crate::utils::number;
use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GradeEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub grade: f64,
}

/// Scanned grades whose value coerces to a finite number, in scan order.
pub fn numeric_entries(items: Vec<StoredGrade>) -> Vec<GradeEntry> {
    items
        .into_iter()
        .map(|item| GradeEntry {
            grade: number::coerce(item.grade.as_ref()),
            student_id: item.student_id,
        })
        .filter(|entry| entry.grade.is_finite())
        .collect()
}

pub fn average(entries: &[GradeEntry]) -> f64 {
    let grades: Vec<f64> = entries.iter().map(|entry| entry.grade).collect();
    number::average(&grades)
}
