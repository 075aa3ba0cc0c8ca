use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::meals::{
    self,
    repo_types::{Meal, MealChanges},
};
use crate::users::{self, repo_types::User};

/// Everything the handlers need from persistence. Each call is one statement.
///
/// Meal operations always take the caller's session id; a row belonging to
/// another session behaves exactly like a missing row.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn insert_user(&self, user: &User) -> anyhow::Result<()>;
    async fn list_users(&self) -> anyhow::Result<Vec<User>>;
    async fn find_user(&self, session_id: Uuid, user_id: Uuid) -> anyhow::Result<Option<User>>;
    async fn session_exists(&self, session_id: Uuid) -> anyhow::Result<bool>;

    async fn insert_meal(&self, meal: &Meal) -> anyhow::Result<()>;
    /// Insertion order.
    async fn list_meals(&self, session_id: Uuid) -> anyhow::Result<Vec<Meal>>;
    async fn find_meal(&self, session_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>>;
    async fn update_meal(
        &self,
        session_id: Uuid,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> anyhow::Result<u64>;
    async fn delete_meal(&self, session_id: Uuid, meal_id: Uuid) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgStorage {
    db: PgPool,
}

impl PgStorage {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn insert_user(&self, user: &User) -> anyhow::Result<()> {
        users::repo::insert(&self.db, user).await
    }

    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        users::repo::list_all(&self.db).await
    }

    async fn find_user(&self, session_id: Uuid, user_id: Uuid) -> anyhow::Result<Option<User>> {
        users::repo::find_in_session(&self.db, session_id, user_id).await
    }

    async fn session_exists(&self, session_id: Uuid) -> anyhow::Result<bool> {
        users::repo::session_exists(&self.db, session_id).await
    }

    async fn insert_meal(&self, meal: &Meal) -> anyhow::Result<()> {
        meals::repo::insert(&self.db, meal).await
    }

    async fn list_meals(&self, session_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        meals::repo::list_by_session(&self.db, session_id).await
    }

    async fn find_meal(&self, session_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
        meals::repo::find_in_session(&self.db, session_id, meal_id).await
    }

    async fn update_meal(
        &self,
        session_id: Uuid,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> anyhow::Result<u64> {
        meals::repo::update_in_session(&self.db, session_id, meal_id, changes).await
    }

    async fn delete_meal(&self, session_id: Uuid, meal_id: Uuid) -> anyhow::Result<u64> {
        meals::repo::delete_in_session(&self.db, session_id, meal_id).await
    }
}

#[cfg(test)]
pub use memory::MemoryStorage;

#[cfg(test)]
mod memory {
    use super::*;
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct Tables {
        users: Vec<User>,
        meals: Vec<Meal>,
    }

    /// Vec-backed store; push order is insertion order.
    #[derive(Default)]
    pub struct MemoryStorage {
        tables: RwLock<Tables>,
    }

    #[async_trait]
    impl Storage for MemoryStorage {
        async fn insert_user(&self, user: &User) -> anyhow::Result<()> {
            self.tables.write().await.users.push(user.clone());
            Ok(())
        }

        async fn list_users(&self) -> anyhow::Result<Vec<User>> {
            Ok(self.tables.read().await.users.clone())
        }

        async fn find_user(&self, session_id: Uuid, user_id: Uuid) -> anyhow::Result<Option<User>> {
            let t = self.tables.read().await;
            Ok(t.users
                .iter()
                .find(|u| u.id == user_id && u.session_id == session_id)
                .cloned())
        }

        async fn session_exists(&self, session_id: Uuid) -> anyhow::Result<bool> {
            let t = self.tables.read().await;
            Ok(t.users.iter().any(|u| u.session_id == session_id))
        }

        async fn insert_meal(&self, meal: &Meal) -> anyhow::Result<()> {
            self.tables.write().await.meals.push(meal.clone());
            Ok(())
        }

        async fn list_meals(&self, session_id: Uuid) -> anyhow::Result<Vec<Meal>> {
            let t = self.tables.read().await;
            Ok(t.meals
                .iter()
                .filter(|m| m.session_id == session_id)
                .cloned()
                .collect())
        }

        async fn find_meal(&self, session_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
            let t = self.tables.read().await;
            Ok(t.meals
                .iter()
                .find(|m| m.id == meal_id && m.session_id == session_id)
                .cloned())
        }

        async fn update_meal(
            &self,
            session_id: Uuid,
            meal_id: Uuid,
            changes: MealChanges,
        ) -> anyhow::Result<u64> {
            let mut t = self.tables.write().await;
            match t
                .meals
                .iter_mut()
                .find(|m| m.id == meal_id && m.session_id == session_id)
            {
                Some(meal) => {
                    changes.apply(meal);
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn delete_meal(&self, session_id: Uuid, meal_id: Uuid) -> anyhow::Result<u64> {
            let mut t = self.tables.write().await;
            let before = t.meals.len();
            t.meals
                .retain(|m| !(m.id == meal_id && m.session_id == session_id));
            Ok((before - t.meals.len()) as u64)
        }
    }
}
