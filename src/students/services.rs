use lazy_static::lazy_static;
use regex::Regex;
use time::{macros::format_description, Date};
use tracing::warn;

use crate::error::ValidationError;
use crate::students::dto::StudentPayload;
use crate::students::repo_types::NewStudent;

pub(crate) fn parse_dob(raw: &str) -> Result<Date, ValidationError> {
    lazy_static! {
        static ref DOB_RE: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();
    }
    if !DOB_RE.is_match(raw) {
        return Err(ValidationError::InvalidDate(raw.to_string()));
    }
    // shape is right, the calendar may still reject it (2001-02-29)
    let dob = Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))?;
    // there is no year 0 in the Gregorian calendar
    if dob.year() < 1 {
        return Err(ValidationError::InvalidDate(raw.to_string()));
    }
    Ok(dob)
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(value)
}

fn build(payload: StudentPayload) -> Result<NewStudent, ValidationError> {
    let first_name = required(payload.first_name, "first_name")?;
    let last_name = required(payload.last_name, "last_name")?;
    let dob = parse_dob(&required(payload.dob, "dob")?)?;
    Ok(NewStudent {
        first_name,
        last_name,
        dob,
        amount_due: payload.amount_due.unwrap_or(0.0),
    })
}

/// Turn a raw create/update body into the fields the store writes.
pub fn validate_payload(payload: StudentPayload) -> Result<NewStudent, ValidationError> {
    build(payload).map_err(|e| {
        warn!(error = %e, "student payload rejected");
        e
    })
}
