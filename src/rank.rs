//! Top-N rankings over the consumption log.
//!
//! Each public ranking carries its own limit and unresolved-entry policy;
//! product rankings keep codes missing from the catalog while service
//! rankings drop them.

use std::cmp::Ordering;

use crate::aggregate::{quantity_by_client, quantity_by_code, value_by_client, Amount, Totals};
use crate::cost::CatalogPrices;
use crate::index::Index;
use crate::types::{
    Client, ClientQuantityRow, ClientValueRow, CodeRow, ConsumptionRecord, Product, Service,
    NOT_FOUND,
};

pub const CLIENTS_BY_QUANTITY_LIMIT: usize = 10;
pub const CLIENTS_BY_VALUE_LIMIT: usize = 5;
pub const PRODUCTS_LIMIT: usize = 5;
pub const SERVICES_LIMIT: usize = 5;

/// What to do with a key whose display name cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    /// Keep the row, named [`NOT_FOUND`].
    Keep,
    /// Drop the row before ranking, so it does not count towards the limit.
    Drop,
}

pub const CLIENTS_BY_QUANTITY_POLICY: Unresolved = Unresolved::Drop;
pub const CLIENTS_BY_VALUE_POLICY: Unresolved = Unresolved::Drop;
pub const PRODUCTS_POLICY: Unresolved = Unresolved::Keep;
pub const SERVICES_POLICY: Unresolved = Unresolved::Drop;

/// A ranked key with its resolved display name.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<V> {
    pub key: String,
    pub name: String,
    pub total: V,
}

/// Resolve names, apply the unresolved policy, sort by total descending and
/// keep the first `limit` rows.
///
/// The sort is stable, so equal totals stay in first-seen order.
pub fn top_n<'n, V, F>(
    totals: &Totals<V>,
    resolve: F,
    limit: usize,
    unresolved: Unresolved,
) -> Vec<Ranked<V>>
where
    V: Amount + PartialOrd,
    F: Fn(&str) -> Option<&'n str>,
{
    let mut rows: Vec<Ranked<V>> = totals
        .iter()
        .filter_map(|(key, total)| {
            let name = match (resolve(key), unresolved) {
                (Some(name), _) => name.to_string(),
                (None, Unresolved::Keep) => NOT_FOUND.to_string(),
                (None, Unresolved::Drop) => return None,
            };
            Some(Ranked {
                key: key.to_string(),
                name,
                total,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    rows.truncate(limit);
    rows
}

/// Clients with the most items consumed. Unknown CPFs are left out.
pub fn rank_clients_by_quantity(
    clients: &[Client],
    consumptions: &[ConsumptionRecord],
    limit: usize,
) -> Vec<ClientQuantityRow> {
    let index = Index::new(clients);
    let totals = quantity_by_client(consumptions);

    top_n(&totals, |cpf| index.name_of(cpf), limit, CLIENTS_BY_QUANTITY_POLICY)
        .into_iter()
        .map(|r| ClientQuantityRow {
            cpf: r.key,
            name: r.name,
            total: r.total,
        })
        .collect()
}

/// Clients with the highest spend. Unknown CPFs are left out; unknown codes
/// are worth nothing.
pub fn rank_clients_by_value(
    clients: &[Client],
    consumptions: &[ConsumptionRecord],
    products: &[Product],
    services: &[Service],
    limit: usize,
) -> Vec<ClientValueRow> {
    let index = Index::new(clients);
    let prices = CatalogPrices::new(products, services);
    let totals = value_by_client(consumptions, &prices);

    top_n(&totals, |cpf| index.name_of(cpf), limit, CLIENTS_BY_VALUE_POLICY)
        .into_iter()
        .map(|r| ClientValueRow {
            cpf: r.key,
            name: r.name,
            value: r.total,
        })
        .collect()
}

/// Most consumed codes named from the product catalog. Codes the catalog
/// does not know stay in the ranking as [`NOT_FOUND`].
pub fn rank_products(
    products: &[Product],
    consumptions: &[ConsumptionRecord],
    limit: usize,
) -> Vec<CodeRow> {
    let index = Index::new(products);
    rank_codes(consumptions, |code| index.name_of(code), limit, PRODUCTS_POLICY)
}

/// Most consumed codes named from the service catalog. Codes the catalog
/// does not know are dropped.
pub fn rank_services(
    services: &[Service],
    consumptions: &[ConsumptionRecord],
    limit: usize,
) -> Vec<CodeRow> {
    let index = Index::new(services);
    rank_codes(consumptions, |code| index.name_of(code), limit, SERVICES_POLICY)
}

fn rank_codes<'n>(
    consumptions: &[ConsumptionRecord],
    resolve: impl Fn(&str) -> Option<&'n str>,
    limit: usize,
    unresolved: Unresolved,
) -> Vec<CodeRow> {
    let totals = quantity_by_code(consumptions);
    top_n(&totals, resolve, limit, unresolved)
        .into_iter()
        .map(|r| CodeRow {
            code: r.key,
            name: r.name,
            total: r.total,
        })
        .collect()
}
