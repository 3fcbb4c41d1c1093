use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::students::repo_types::{NewStudent, Student};

/// Durable storage of student records.
///
/// Absence is reported through `Option`/`bool`; an `Err` always means the
/// backend itself failed. Every method is a single atomic operation.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Student>>;
    async fn get(&self, id: i64) -> anyhow::Result<Option<Student>>;
    async fn insert(&self, new: NewStudent) -> anyhow::Result<Student>;
    async fn update(&self, id: i64, fields: NewStudent) -> anyhow::Result<Option<Student>>;
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
    async fn close(&self) {}
}

#[derive(Clone)]
pub struct PgStudentStore {
    db: PgPool,
}

impl PgStudentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Connect and create the `students` table if it does not exist yet.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("connect to database")?;
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("create students table")?;
        Ok(Self::new(db))
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn list(&self) -> anyhow::Result<Vec<Student>> {
        let rows = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, first_name, last_name, dob, amount_due
            FROM students
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list students")?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Student>> {
        let row = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, first_name, last_name, dob, amount_due
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get student")?;
        Ok(row)
    }

    async fn insert(&self, new: NewStudent) -> anyhow::Result<Student> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (first_name, last_name, dob, amount_due)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, dob, amount_due
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.dob)
        .bind(new.amount_due)
        .fetch_one(&self.db)
        .await
        .context("insert student")?;
        debug!(id = student.id, "student row inserted");
        Ok(student)
    }

    async fn update(&self, id: i64, fields: NewStudent) -> anyhow::Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
               SET first_name = $2, last_name = $3, dob = $4, amount_due = $5
             WHERE id = $1
            RETURNING id, first_name, last_name, dob, amount_due
            "#,
        )
        .bind(id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.dob)
        .bind(fields.amount_due)
        .fetch_optional(&self.db)
        .await
        .context("update student")?;
        Ok(student)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM students WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete student")?;
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.db.close().await;
    }
}
