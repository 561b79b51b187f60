//! # Repository Module
//!
//! Database repository implementations for shelf.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                           │
//! │       │  db.products().list_by_price()                                  │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── list_all / list_by_price / search_by_name    (snapshots)           │
//! │  ├── get_by_id / insert / update / delete         (CRUD)                │
//! │  └── count / total_inventory_value / top_inventory_product              │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! SQL lives only in this module.

pub mod product;
