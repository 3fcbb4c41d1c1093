use serde::{Deserialize, Serialize, Serializer};
use time::Date;

use crate::students::repo_types::Student;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Request body for create and update. Every field is optional here so that
/// a missing field becomes a validation error instead of a deserialization one.
#[derive(Debug, Default, Deserialize)]
pub struct StudentPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<String>,
    pub amount_due: Option<f64>,
}

/// Public representation of a student.
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "iso_date")]
    pub dob: Date,
    #[serde(serialize_with = "whole_as_integer")]
    pub amount_due: f64,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            student_id: s.id,
            first_name: s.first_name,
            last_name: s.last_name,
            dob: s.dob,
            amount_due: s.amount_due,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `50.0` goes out as `50`, `12.5` stays `12.5`.
fn whole_as_integer<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        s.serialize_i64(*value as i64)
    } else {
        s.serialize_f64(*value)
    }
}
