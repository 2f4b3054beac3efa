use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::User;

impl User {
    /// Resolve an email to a user id. Point read against the email lookup
    /// table; matching is case-sensitive, no casing normalization happens.
    pub async fn find_user_id_by_email(
        db: &PgPool,
        email: &str,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        let row: Option<(Uuid,)> =
            sqlx::query_as(r#"SELECT user_id FROM email_lookup WHERE email = $1"#)
                .bind(email)
                .fetch_optional(db)
                .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Resolve a username to a user id via the username lookup table.
    pub async fn find_user_id_by_username(
        db: &PgPool,
        username: &str,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        let row: Option<(Uuid,)> =
            sqlx::query_as(r#"SELECT user_id FROM username_lookup WHERE username = $1"#)
                .bind(username)
                .fetch_optional(db)
                .await?;
        Ok(row.map(|(id,)| id))
    }

    pub async fn find_by_id(db: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, password_hash, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    /// Write the user record and both lookup entries as a single unit.
    /// The lookup tables key on the attribute itself, so a concurrent
    /// duplicate sign-up loses the race here instead of leaving a dangling
    /// lookup entry; any failure rolls all three writes back.
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        let mut tx = db.begin().await?;
        sqlx::query(r#"INSERT INTO email_lookup (email, user_id) VALUES ($1, $2)"#)
            .bind(email)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(r#"INSERT INTO username_lookup (username, user_id) VALUES ($1, $2)"#)
            .bind(username)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            r#"
            INSERT INTO users (user_id, username, email, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }
}
