//! The three-step product wizard. A draft is a plain value: each step
//! replaces its section and hands back a new draft.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::model::{Condition, Product, ProductType, Rating};
use crate::validation::{form::missing_fields, validate_form, FieldError};

/// Step 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicInfo {
    pub product_type: ProductType,
    pub name: String,
    pub purchase_date: String,
    pub country: String,
}

impl Default for BasicInfo {
    fn default() -> Self {
        Self {
            product_type: ProductType::Other,
            name: String::new(),
            purchase_date: String::new(),
            country: String::new(),
        }
    }
}

/// Step 2: appearance and commercial details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Details {
    pub brand: String,
    pub price: String,
    pub size: String,
    pub color: String,
    pub condition: Condition,
}

/// Step 3.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub favorite: bool,
    pub rating: Rating,
    pub notes: String,
    pub has_warranty: bool,
    pub warranty_duration: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub basic: BasicInfo,
    pub details: Details,
    pub preferences: Preferences,
}

impl ProductDraft {
    pub fn with_basic_info(self, basic: BasicInfo) -> Self {
        Self { basic, ..self }
    }

    pub fn with_details(self, details: Details) -> Self {
        Self { details, ..self }
    }

    pub fn with_preferences(self, preferences: Preferences) -> Self {
        Self {
            preferences,
            ..self
        }
    }

    /// Final confirmation. Text fields are trimmed; the warranty duration is
    /// dropped when there is no warranty.
    pub fn finish(self, id: Uuid, created_at: OffsetDateTime) -> Result<Product, Vec<FieldError>> {
        if !validate_form(&self) {
            return Err(missing_fields(&self));
        }
        let Self {
            basic,
            details,
            preferences,
        } = self;

        let warranty_duration = if preferences.has_warranty {
            preferences.warranty_duration.trim().to_string()
        } else {
            String::new()
        };

        Ok(Product {
            id,
            product_type: basic.product_type,
            name: basic.name.trim().to_string(),
            purchase_date: basic.purchase_date.trim().to_string(),
            country: basic.country.trim().to_string(),
            brand: details.brand.trim().to_string(),
            price: details.price.trim().to_string(),
            size: details.size.trim().to_string(),
            color: details.color,
            condition: details.condition,
            favorite: preferences.favorite,
            rating: preferences.rating,
            notes: preferences.notes,
            has_warranty: preferences.has_warranty,
            warranty_duration,
            image: preferences.image.filter(|path| !path.trim().is_empty()),
            created_at,
        })
    }
}
