use serde::Serialize;

use crate::meals::repo_types::Meal;

/// Aggregate figures over one session's meals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealMetrics {
    pub total: u64,
    pub total_on_diet: u64,
    pub total_off_diet: u64,
    /// Longest run of consecutive on-diet meals, in the order given.
    pub best_streak: u64,
}

impl MealMetrics {
    /// Single forward pass; the input order is taken as-is.
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut m = Self::default();
        let mut streak = 0u64;
        for on_diet in flags {
            m.total += 1;
            if on_diet {
                m.total_on_diet += 1;
                streak += 1;
                if streak > m.best_streak {
                    m.best_streak = streak;
                }
            } else {
                m.total_off_diet += 1;
                streak = 0;
            }
        }
        m
    }

    pub fn from_meals(meals: &[Meal]) -> Self {
        Self::from_flags(meals.iter().map(|m| m.on_diet))
    }
}
