use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub session_id: Uuid,
    pub name: String,
    pub description: String,
    pub on_diet: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Validated create command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeal {
    pub name: String,
    pub description: String,
    pub on_diet: bool,
}

/// Validated partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub on_diet: Option<bool>,
}

impl MealChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.on_diet.is_none()
    }

    #[cfg(test)]
    pub fn apply(self, meal: &mut Meal) {
        if let Some(name) = self.name {
            meal.name = name;
        }
        if let Some(description) = self.description {
            meal.description = description;
        }
        if let Some(on_diet) = self.on_diet {
            meal.on_diet = on_diet;
        }
    }
}

impl Meal {
    pub fn new(session_id: Uuid, cmd: NewMeal) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            name: cmd.name,
            description: cmd.description,
            on_diet: cmd.on_diet,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
