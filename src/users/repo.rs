use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::users::repo_types::User;

pub async fn insert(db: &PgPool, user: &User) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, name, session_id, created_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(user.session_id)
    .bind(user.created_at)
    .execute(db)
    .await
    .context("insert user")?;
    Ok(())
}

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<User>> {
    let rows = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, session_id, created_at
          FROM users
         ORDER BY seq ASC
        "#,
    )
    .fetch_all(db)
    .await
    .context("list users")?;
    Ok(rows)
}

pub async fn find_in_session(
    db: &PgPool,
    session_id: Uuid,
    user_id: Uuid,
) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, session_id, created_at
          FROM users
         WHERE id = $1 AND session_id = $2
        "#,
    )
    .bind(user_id)
    .bind(session_id)
    .fetch_optional(db)
    .await
    .context("find user in session")?;
    Ok(user)
}

pub async fn session_exists(db: &PgPool, session_id: Uuid) -> anyhow::Result<bool> {
    let exists: bool =
        sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM users WHERE session_id = $1)"#)
            .bind(session_id)
            .fetch_one(db)
            .await
            .context("check session")?;
    Ok(exists)
}
