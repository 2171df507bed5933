use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

/// A user record. Owned and mutated by an external user-management system;
/// this service only reads it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Single group membership, used as the audience filter key.
    pub group_id: String,
    /// Push delivery token for the user's current device, if registered.
    pub fcm_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Find all users belonging to a group. Row order is stable per query
    /// (insertion order) so dispatch token order is deterministic.
    pub async fn find_by_group_id(
        pool: &SqlitePool,
        group_id: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"SELECT id, username, group_id, fcm_token, created_at, updated_at
               FROM users
               WHERE group_id = $1
               ORDER BY rowid"#,
        )
        .bind(group_id)
        .fetch_all(pool)
        .await
    }
}
