//! Personal product-collection catalogue: account plumbing, the product
//! wizard, form validation and the collection filter/sort engine.

pub mod accounts;
pub mod app;
pub mod auth;
pub mod config;
pub mod dates;
pub mod error;
pub mod products;
pub mod state;
pub mod validation;
