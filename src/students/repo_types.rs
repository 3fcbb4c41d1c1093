use sqlx::FromRow;
use time::Date;

/// Student record in the database.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Student {
    pub id: i64,            // assigned by the store, never changes
    pub first_name: String,
    pub last_name: String,
    pub dob: Date,
    pub amount_due: f64,
}

/// Validated field values for an insert or a full overwrite.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub dob: Date,
    pub amount_due: f64,
}

impl NewStudent {
    pub fn into_student(self, id: i64) -> Student {
        Student {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            dob: self.dob,
            amount_due: self.amount_due,
        }
    }
}
