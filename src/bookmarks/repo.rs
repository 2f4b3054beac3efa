use sqlx::PgPool;
use uuid::Uuid;

use crate::bookmarks::repo_types::Bookmark;

impl Bookmark {
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> Result<Vec<Bookmark>, sqlx::Error> {
        sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT id, user_id, title, description, link, created_at
            FROM bookmarks
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    /// Fetch by id alone; the handler decides whether the caller may see it.
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Bookmark>, sqlx::Error> {
        sqlx::query_as::<_, Bookmark>(
            r#"
            SELECT id, user_id, title, description, link, created_at
            FROM bookmarks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
        link: &str,
    ) -> Result<Bookmark, sqlx::Error> {
        sqlx::query_as::<_, Bookmark>(
            r#"
            INSERT INTO bookmarks (id, user_id, title, description, link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, description, link, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(link)
        .fetch_one(db)
        .await
    }

    /// Patch-style update: absent fields keep their stored value.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        link: Option<&str>,
    ) -> Result<Bookmark, sqlx::Error> {
        sqlx::query_as::<_, Bookmark>(
            r#"
            UPDATE bookmarks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                link = COALESCE($4, link)
            WHERE id = $1
            RETURNING id, user_id, title, description, link, created_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(link)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(r#"DELETE FROM bookmarks WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
