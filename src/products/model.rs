use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Product category. The set is closed; each variant owns a fixed accent
/// color and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Consumable,
    Durable,
    Other,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [Self::Consumable, Self::Durable, Self::Other];

    pub fn label(self) -> &'static str {
        match self {
            Self::Consumable => "Consumable",
            Self::Durable => "Durable",
            Self::Other => "Other",
        }
    }

    pub fn accent_color(self) -> &'static str {
        match self {
            Self::Consumable => "#4CAF50",
            Self::Durable => "#2196F3",
            Self::Other => "#9E9E9E",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Consumable => "shopping_basket",
            Self::Durable => "chair",
            Self::Other => "category",
        }
    }

    /// Accepts the serialized names (`durable`) as well as labels (`Durable`).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

/// Star rating, always within `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn new(stars: i64) -> Self {
        Self(stars.clamp(0, Self::MAX as i64) as u8)
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl From<i64> for Rating {
    fn from(stars: i64) -> Self {
        Self::new(stars)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A catalogued item as stored in a user's collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub product_type: ProductType,
    pub name: String,
    /// `day/month/year` as typed; may be malformed.
    pub purchase_date: String,
    pub country: String,
    pub brand: String,
    /// Decimal as typed; may be malformed.
    pub price: String,
    pub size: String,
    pub color: String,
    pub condition: Condition,
    pub favorite: bool,
    pub rating: Rating,
    pub notes: String,
    pub has_warranty: bool,
    pub warranty_duration: String,
    pub image: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_is_clamped() {
        assert_eq!(Rating::new(-3).stars(), 0);
        assert_eq!(Rating::new(4).stars(), 4);
        assert_eq!(Rating::new(42).stars(), 5);
    }

    #[test]
    fn rating_clamps_on_deserialize() {
        let rating: Rating = serde_json::from_str("9").unwrap();
        assert_eq!(rating.stars(), 5);
        assert_eq!(serde_json::to_string(&Rating::new(3)).unwrap(), "3");
    }

    #[test]
    fn type_parse_accepts_names_and_labels() {
        assert_eq!(ProductType::parse("durable"), Some(ProductType::Durable));
        assert_eq!(ProductType::parse(" Consumable "), Some(ProductType::Consumable));
        assert_eq!(ProductType::parse("gadget"), None);
    }

    #[test]
    fn every_type_has_distinct_presentation() {
        let colors: std::collections::HashSet<_> =
            ProductType::ALL.iter().map(|t| t.accent_color()).collect();
        let icons: std::collections::HashSet<_> =
            ProductType::ALL.iter().map(|t| t.icon()).collect();
        assert_eq!(colors.len(), ProductType::ALL.len());
        assert_eq!(icons.len(), ProductType::ALL.len());
    }

    #[test]
    fn condition_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Condition::LikeNew).unwrap(),
            "\"like_new\""
        );
    }
}
