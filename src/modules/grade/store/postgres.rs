use crate::{
    modules::grade::repository::{Error, ErrorKind, GradeRecord, GradeStore, StoredGrade},
    utils::database::DatabaseConnection,
};
use async_trait::async_trait;
use serde_json::json;

/// Grades kept in the `student_grades` Postgres table.
pub struct PgStore {
    db_conn: DatabaseConnection,
}

impl PgStore {
    pub fn new(db_conn: DatabaseConnection) -> Self {
        Self { db_conn }
    }
}

fn from_sqlx(err: sqlx::Error) -> Error {
    let kind = match &err {
        sqlx::Error::Database(_) => ErrorKind::Rejected,
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => ErrorKind::Decode,
        _ => ErrorKind::Unavailable,
    };

    Error::new(kind, err.to_string())
}

#[async_trait]
impl GradeStore for PgStore {
    async fn scan(&self) -> Result<Vec<StoredGrade>, Error> {
        sqlx::query_as::<_, StoredGrade>(
            r#"SELECT student_id, "timestamp", grade FROM student_grades"#,
        )
        .fetch_all(&self.db_conn.pool)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to scan grades: {}", err);
            from_sqlx(err)
        })
    }

    async fn put(&self, record: GradeRecord) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO student_grades
            (student_id, "timestamp", grade)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&record.student_id)
        .bind(record.timestamp)
        .bind(json!(record.grade))
        .execute(&self.db_conn.pool)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while saving grade for {}: {}",
                record.student_id,
                err
            );
            from_sqlx(err)
        })
    }
}
