//! Defines the category model and its create and update schemas.
//!
//! A category groups transactions of the same kind, e.g. 'Mercado' or
//! 'Salário'. Each category only applies to either income or expenses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::UserId,
    transaction::TransactionType,
    validation::{self, ValidationErrors, required},
};

/// Alias for the ID type of categories.
pub type CategoryId = Uuid;

const INVALID_NAME: &str = "Nome deve ter entre 1 e 100 caracteres";
const INVALID_TYPE: &str = "Tipo deve ser 'income' ou 'expense'";
const INVALID_ICON: &str = "Ícone deve ter no máximo 50 caracteres";

/// A category for expenses or income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub user_id: UserId,
    pub name: String,
    /// Whether the category is for income or expenses.
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    /// A `#RRGGBB` hex color used in charts.
    pub color: String,
    pub icon: Option<String>,
}

impl Category {
    pub fn from_new(id: CategoryId, user_id: UserId, new: NewCategory) -> Self {
        Self {
            id,
            user_id,
            name: new.name,
            category_type: new.category_type,
            color: new.color,
            icon: new.icon,
        }
    }

    /// Apply the fields set in `update` to a copy of this category.
    pub fn apply_update(&self, update: &CategoryUpdate) -> Self {
        Self {
            id: self.id,
            user_id: self.user_id,
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            category_type: update.category_type.unwrap_or(self.category_type),
            color: update.color.clone().unwrap_or_else(|| self.color.clone()),
            icon: update.icon.clone().or_else(|| self.icon.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub category_type: TransactionType,
    pub color: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub category_type: Option<TransactionType>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// The unvalidated fields of a category as sent by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category_type: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl CategoryPayload {
    /// Validate the payload as a new category.
    ///
    /// # Errors
    /// Returns every field that is missing or invalid.
    pub fn validate_new(&self) -> Result<NewCategory, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = self.parse_fields(&mut errors);

        let name = required(&mut errors, "name", self.name.as_ref()).and(fields.name);
        let category_type =
            required(&mut errors, "type", self.category_type.as_ref()).and(fields.category_type);
        let color = required(&mut errors, "color", self.color.as_ref()).and(fields.color);

        match (name, category_type, color) {
            (Some(name), Some(category_type), Some(color)) if errors.is_empty() => {
                Ok(NewCategory {
                    name,
                    category_type,
                    color,
                    icon: fields.icon,
                })
            }
            _ => Err(errors),
        }
    }

    /// Validate the payload as a partial update.
    ///
    /// # Errors
    /// Returns every field that is present but invalid.
    pub fn validate_update(&self) -> Result<CategoryUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = self.parse_fields(&mut errors);

        errors.into_result(|| fields)
    }

    fn parse_fields(&self, errors: &mut ValidationErrors) -> CategoryUpdate {
        CategoryUpdate {
            name: self
                .name
                .as_deref()
                .and_then(|name| validation::text(errors, "name", name, 1, 100, INVALID_NAME)),
            category_type: self.category_type.as_deref().and_then(|value| {
                validation::one_of::<TransactionType>(errors, "type", value, INVALID_TYPE)
            }),
            color: self
                .color
                .as_deref()
                .and_then(|color| validation::hex_color(errors, "color", color)),
            icon: self
                .icon
                .as_deref()
                .and_then(|icon| validation::text(errors, "icon", icon, 0, 50, INVALID_ICON))
                .filter(|icon| !icon.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::{
        category::{Category, CategoryPayload, CategoryUpdate},
        transaction::TransactionType,
        validation::{INVALID_COLOR, REQUIRED},
    };

    fn payload() -> CategoryPayload {
        CategoryPayload {
            name: Some("Mercado".to_owned()),
            category_type: Some("expense".to_owned()),
            color: Some("#22C55E".to_owned()),
            icon: Some("shopping-cart".to_owned()),
        }
    }

    #[test]
    fn validates_new_category() {
        let new = payload().validate_new().unwrap();

        assert_eq!(new.name, "Mercado");
        assert_eq!(new.category_type, TransactionType::Expense);
        assert_eq!(new.icon.as_deref(), Some("shopping-cart"));
    }

    #[test]
    fn icon_is_optional() {
        let new = CategoryPayload {
            icon: None,
            ..payload()
        }
        .validate_new()
        .unwrap();

        assert_eq!(new.icon, None);
    }

    #[test]
    fn rejects_invalid_color() {
        let errors = CategoryPayload {
            color: Some("green".to_owned()),
            ..payload()
        }
        .validate_new()
        .unwrap_err();

        assert_eq!(errors.issues()[0].path, "color");
        assert_eq!(errors.issues()[0].message, INVALID_COLOR);
    }

    #[test]
    fn requires_name_type_and_color() {
        let errors = CategoryPayload::default().validate_new().unwrap_err();

        assert_eq!(errors.issues().len(), 3);
        assert!(errors.issues().iter().all(|issue| issue.message == REQUIRED));
    }

    #[test]
    fn update_keeps_unset_fields() {
        let category = Category::from_new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            payload().validate_new().unwrap(),
        );

        let updated = category.apply_update(&CategoryUpdate {
            name: Some("Supermercado".to_owned()),
            ..Default::default()
        });

        assert_eq!(updated.name, "Supermercado");
        assert_eq!(updated.color, category.color);
        assert_eq!(updated.icon, category.icon);
    }
}
