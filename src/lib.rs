//! Consumption analytics for the PetLovers pet-store system.
//!
//! Every query is a pure function over a [`Snapshot`]: it rebuilds its
//! lookups, rescans the consumption log and returns display-ready rows.

pub mod aggregate;
pub mod breakdown;
pub mod cost;
pub mod history;
pub mod index;
pub mod rank;
pub mod snapshot;
pub mod types;

pub use breakdown::{
    breakdown_products_by_pet_type_and_breed, breakdown_services_by_pet_type_and_breed, Breakdown,
};
pub use rank::{rank_clients_by_quantity, rank_clients_by_value, rank_products, rank_services};
pub use snapshot::{load_snapshot, Snapshot};
