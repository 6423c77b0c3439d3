use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{
    filter::{DateRange, FilterConfig, SortKey},
    model::{Product, ProductType},
};
use crate::{
    error::ApiError,
    validation::{FieldError, StepStatus},
};

/// `GET /products` query. List-valued filters are comma separated.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub types: Option<String>,
    pub countries: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub favorites: bool,
    pub sort: SortKey,
    pub page: usize,
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl ListQuery {
    pub fn filter_config(&self) -> Result<FilterConfig, ApiError> {
        let types = split_list(self.types.as_deref())
            .map(|t| {
                ProductType::parse(t)
                    .ok_or_else(|| ApiError::BadRequest(format!("unknown product type `{t}`")))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        let countries = split_list(self.countries.as_deref())
            .map(str::to_string)
            .collect();

        let date_range = match (&self.from, &self.to) {
            (Some(start), Some(end)) => Some(DateRange {
                start: start.clone(),
                end: end.clone(),
            }),
            (None, None) => None,
            _ => {
                return Err(ApiError::BadRequest(
                    "`from` and `to` must be given together".into(),
                ))
            }
        };

        Ok(FilterConfig {
            search: self.search.clone().unwrap_or_default(),
            types,
            countries,
            date_range,
            favorites_only: self.favorites,
            sort: self.sort,
        })
    }
}

/// One page of a result list.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total: usize,
}

impl<T> Page<T> {
    /// An out-of-range `page` is clamped to the last page.
    pub fn slice(items: Vec<T>, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total = items.len();
        let page_count = total.div_ceil(page_size).max(1);
        let page = page.min(page_count - 1);
        let items = items
            .into_iter()
            .skip(page * page_size)
            .take(page_size)
            .collect();
        Self {
            items,
            page,
            page_size,
            page_count,
            total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    #[serde(flatten)]
    pub page: Page<Product>,
    pub active_filters: usize,
    pub filters: FilterConfig,
}

#[derive(Debug, Serialize)]
pub struct WizardCheck {
    #[serde(flatten)]
    pub status: StepStatus,
    pub missing: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct ProductTypeInfo {
    pub product_type: ProductType,
    pub label: &'static str,
    pub accent_color: &'static str,
    pub icon: &'static str,
}

impl From<ProductType> for ProductTypeInfo {
    fn from(product_type: ProductType) -> Self {
        Self {
            product_type,
            label: product_type.label(),
            accent_color: product_type.accent_color(),
            icon: product_type.icon(),
        }
    }
}
