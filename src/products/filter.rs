//! Search, filter and sort over an in-memory collection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::Date;

use super::model::{Product, ProductType};
use crate::dates::{parse_day_month_year, EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    NameAsc,
    NameDesc,
    DateAsc,
    #[default]
    DateDesc,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

/// Purchase-date window, bounds in `day/month/year` text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// The default value is the cleared state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub search: String,
    pub types: BTreeSet<ProductType>,
    pub countries: BTreeSet<String>,
    pub date_range: Option<DateRange>,
    pub favorites_only: bool,
    pub sort: SortKey,
}

impl FilterConfig {
    fn search_term(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }
}

/// Applies search, type, country, favorites and date filters in that order,
/// then sorts. The input is left untouched.
pub fn filter_and_sort(products: &[Product], config: &FilterConfig) -> Vec<Product> {
    let term = config.search_term();

    let mut out: Vec<Product> = products
        .iter()
        .filter(|p| term.as_deref().map_or(true, |t| matches_search(p, t)))
        .filter(|p| config.types.is_empty() || config.types.contains(&p.product_type))
        .filter(|p| config.countries.is_empty() || config.countries.contains(&p.country))
        .filter(|p| !config.favorites_only || p.favorite)
        .filter(|p| {
            config
                .date_range
                .as_ref()
                .map_or(true, |range| within_range(p, range))
        })
        .cloned()
        .collect();

    sort_products(&mut out, config.sort);
    out
}

fn matches_search(product: &Product, term: &str) -> bool {
    product.name.to_lowercase().contains(term) || product.brand.to_lowercase().contains(term)
}

/// Strictly between the bounds. A record whose date or either bound does not
/// parse is kept.
fn within_range(product: &Product, range: &DateRange) -> bool {
    let parsed = (
        parse_day_month_year(&product.purchase_date),
        parse_day_month_year(&range.start),
        parse_day_month_year(&range.end),
    );
    match parsed {
        (Some(date), Some(start), Some(end)) => date > start && date < end,
        _ => true,
    }
}

/// Stable sort by `key`.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    let by_name = |a: &Product, b: &Product| a.name.to_lowercase().cmp(&b.name.to_lowercase());
    let by_date = |a: &Product, b: &Product| sort_date(a).cmp(&sort_date(b));
    let by_price = |a: &Product, b: &Product| sort_price(a).total_cmp(&sort_price(b));

    match key {
        SortKey::NameAsc => products.sort_by(by_name),
        SortKey::NameDesc => products.sort_by(|a, b| by_name(b, a)),
        SortKey::DateAsc => products.sort_by(by_date),
        SortKey::DateDesc => products.sort_by(|a, b| by_date(b, a)),
        SortKey::PriceAsc => products.sort_by(by_price),
        SortKey::PriceDesc => products.sort_by(|a, b| by_price(b, a)),
        SortKey::RatingDesc => products.sort_by(|a, b| b.rating.cmp(&a.rating)),
    }
}

fn sort_date(product: &Product) -> Date {
    parse_day_month_year(&product.purchase_date).unwrap_or(EPOCH)
}

/// Price as a number; `12,50` is read as `12.50`. Anything else is `0.0`.
pub fn parse_price(text: &str) -> f64 {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .unwrap_or(0.0)
}

fn sort_price(product: &Product) -> f64 {
    parse_price(&product.price)
}

/// Distinct non-blank countries across the collection, sorted.
pub fn available_countries(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.country.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Number of filter dimensions in use. Sorting does not count.
pub fn active_filter_count(config: &FilterConfig) -> usize {
    [
        config.search_term().is_some(),
        !config.types.is_empty(),
        !config.countries.is_empty(),
        config.date_range.is_some(),
        config.favorites_only,
    ]
    .into_iter()
    .filter(|active| *active)
    .count()
}
