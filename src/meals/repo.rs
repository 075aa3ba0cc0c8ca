use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::meals::repo_types::{Meal, MealChanges};

pub async fn insert(db: &PgPool, meal: &Meal) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO meals (id, session_id, name, description, on_diet, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(meal.id)
    .bind(meal.session_id)
    .bind(&meal.name)
    .bind(&meal.description)
    .bind(meal.on_diet)
    .bind(meal.created_at)
    .execute(db)
    .await
    .context("insert meal")?;
    Ok(())
}

/// All meals of a session in insertion order.
pub async fn list_by_session(db: &PgPool, session_id: Uuid) -> anyhow::Result<Vec<Meal>> {
    let rows = sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, session_id, name, description, on_diet, created_at
          FROM meals
         WHERE session_id = $1
         ORDER BY seq ASC
        "#,
    )
    .bind(session_id)
    .fetch_all(db)
    .await
    .context("list meals by session")?;
    Ok(rows)
}

pub async fn find_in_session(
    db: &PgPool,
    session_id: Uuid,
    meal_id: Uuid,
) -> anyhow::Result<Option<Meal>> {
    let meal = sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, session_id, name, description, on_diet, created_at
          FROM meals
         WHERE id = $1 AND session_id = $2
        "#,
    )
    .bind(meal_id)
    .bind(session_id)
    .fetch_optional(db)
    .await
    .context("find meal in session")?;
    Ok(meal)
}

/// Returns the number of rows touched (0 or 1).
pub async fn update_in_session(
    db: &PgPool,
    session_id: Uuid,
    meal_id: Uuid,
    changes: MealChanges,
) -> anyhow::Result<u64> {
    let res = sqlx::query(
        r#"
        UPDATE meals
           SET name        = COALESCE($3, name),
               description = COALESCE($4, description),
               on_diet     = COALESCE($5, on_diet)
         WHERE id = $1 AND session_id = $2
        "#,
    )
    .bind(meal_id)
    .bind(session_id)
    .bind(changes.name)
    .bind(changes.description)
    .bind(changes.on_diet)
    .execute(db)
    .await
    .context("update meal")?;
    Ok(res.rows_affected())
}

pub async fn delete_in_session(db: &PgPool, session_id: Uuid, meal_id: Uuid) -> anyhow::Result<u64> {
    let res = sqlx::query(r#"DELETE FROM meals WHERE id = $1 AND session_id = $2"#)
        .bind(meal_id)
        .bind(session_id)
        .execute(db)
        .await
        .context("delete meal")?;
    Ok(res.rows_affected())
}
