use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Task {
    /// All tasks recorded for a user, oldest first.
    pub async fn list_by_user(db: &PgPool, user_id: i64) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, description, created_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    /// Record a new task for a user.
    pub async fn create(
        db: &PgPool,
        user_id: i64,
        description: &str,
    ) -> Result<Task, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, description)
            VALUES ($1, $2)
            RETURNING id, user_id, description, created_at
            "#,
        )
        .bind(user_id)
        .bind(description)
        .fetch_one(db)
        .await
    }
}
