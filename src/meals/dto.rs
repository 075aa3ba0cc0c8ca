use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::meals::repo_types::{Meal, MealChanges, NewMeal};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    pub name: String,
    pub description: String,
    #[serde(alias = "on_diet")]
    pub on_diet: bool,
}

/// Absent and `null` fields both mean "leave as is".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "on_diet")]
    pub on_diet: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct MealList {
    pub meals: Vec<Meal>,
}

/// Single lookup; keyed `meals` like the listing so clients read one field.
#[derive(Debug, Serialize)]
pub struct MealEnvelope {
    #[serde(rename = "meals")]
    pub meal: Option<Meal>,
}

fn non_blank(name: String) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("name must not be empty"));
    }
    Ok(trimmed.to_string())
}

impl TryFrom<CreateMealRequest> for NewMeal {
    type Error = AppError;

    fn try_from(req: CreateMealRequest) -> Result<Self, Self::Error> {
        Ok(NewMeal {
            name: non_blank(req.name)?,
            description: req.description,
            on_diet: req.on_diet,
        })
    }
}

impl TryFrom<UpdateMealRequest> for MealChanges {
    type Error = AppError;

    fn try_from(req: UpdateMealRequest) -> Result<Self, Self::Error> {
        Ok(MealChanges {
            name: req.name.map(non_blank).transpose()?,
            description: req.description,
            on_diet: req.on_diet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(json: &str) -> Result<MealChanges, AppError> {
        let req: UpdateMealRequest = serde_json::from_str(json).expect("valid json");
        MealChanges::try_from(req)
    }

    #[test]
    fn create_accepts_camel_case_and_snake_alias() {
        for body in [
            r#"{"name":"Lunch","description":"Rice","onDiet":true}"#,
            r#"{"name":"Lunch","description":"Rice","on_diet":true}"#,
        ] {
            let req: CreateMealRequest = serde_json::from_str(body).unwrap();
            let cmd = NewMeal::try_from(req).unwrap();
            assert!(cmd.on_diet);
            assert_eq!(cmd.name, "Lunch");
        }
    }

    #[test]
    fn create_requires_on_diet() {
        let res = serde_json::from_str::<CreateMealRequest>(r#"{"name":"x","description":""}"#);
        assert!(res.is_err());
    }

    #[test]
    fn create_rejects_blank_name_but_allows_empty_description() {
        let req = CreateMealRequest {
            name: " ".into(),
            description: String::new(),
            on_diet: false,
        };
        assert!(NewMeal::try_from(req).is_err());

        let req = CreateMealRequest {
            name: "Snack".into(),
            description: String::new(),
            on_diet: false,
        };
        assert_eq!(NewMeal::try_from(req).unwrap().description, "");
    }

    #[test]
    fn update_distinguishes_false_from_absent() {
        assert_eq!(update(r#"{"onDiet":false}"#).unwrap().on_diet, Some(false));
        assert_eq!(update(r#"{}"#).unwrap().on_diet, None);
        assert_eq!(update(r#"{"onDiet":null}"#).unwrap().on_diet, None);
    }

    #[test]
    fn update_with_only_description() {
        let changes = update(r#"{"description":"Less salt"}"#).unwrap();
        assert_eq!(
            changes,
            MealChanges {
                description: Some("Less salt".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn single_meal_is_keyed_meals() {
        let meal = Meal::new(
            uuid::Uuid::new_v4(),
            NewMeal {
                name: "Cafe".into(),
                description: "Coffee".into(),
                on_diet: true,
            },
        );
        let json = serde_json::to_value(MealEnvelope { meal: Some(meal) }).unwrap();
        assert_eq!(json["meals"]["name"], "Cafe");
        assert!(json.get("meal").is_none());

        let json = serde_json::to_value(MealEnvelope { meal: None }).unwrap();
        assert!(json["meals"].is_null());
    }

    #[test]
    fn update_rejects_blank_name() {
        assert!(matches!(update(r#"{"name":""}"#), Err(AppError::Validation(_))));
    }
}
