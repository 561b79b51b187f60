//! # HTTP Routes
//!
//! - [`products`] - Catalog CRUD
//! - [`inventory`] - Inventory summary
//! - [`combinations`] - Budget-fitting product groups
//! - [`health`] - Liveness and migration status

pub mod combinations;
pub mod health;
pub mod inventory;
pub mod products;
