//! Data table state library
//!
//! Filter, pagination, sorting, visibility and selection state for admin
//! list views, composed into a [`table::DataTable`] that either slices rows
//! locally or relays page changes to a server.

pub mod cache;
pub mod context;
pub mod error;
pub mod model;
pub mod optimistic;
pub mod query;
pub mod state;
pub mod table;
