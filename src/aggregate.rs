use std::collections::HashMap;

use crate::cost::PriceTable;
use crate::index::Index;
use crate::types::{ConsumptionRecord, Pet};

/// A total that can take one more amount without panicking.
///
/// Quantities saturate at `u64::MAX` instead of wrapping.
pub trait Amount: Copy + Default {
    fn accumulate(&mut self, amount: Self);
}

impl Amount for u64 {
    fn accumulate(&mut self, amount: u64) {
        *self = self.saturating_add(amount);
    }
}

impl Amount for f64 {
    fn accumulate(&mut self, amount: f64) {
        *self += amount;
    }
}

/// Per-key running totals that remember the order keys were first seen.
///
/// That order is the tie-break of every ranking built on top, so it has to
/// follow the transaction log rather than hash order.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals<V> {
    entries: Vec<(String, V)>,
    positions: HashMap<String, usize>,
}

impl<V> Default for Totals<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<V: Amount> Totals<V> {
    pub fn add(&mut self, key: &str, amount: V) {
        let idx = match self.positions.get(key) {
            Some(&idx) => idx,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.positions.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[idx].1.accumulate(amount);
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.positions.get(key).map(|&idx| self.entries[idx].1)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, V)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Sum of item quantities per `cpfCliente`.
pub fn quantity_by_client(records: &[ConsumptionRecord]) -> Totals<u64> {
    let mut totals = Totals::default();
    for r in records {
        totals.add(&r.client_cpf, r.total_quantity());
    }
    totals
}

/// Sum of `quantity * price` per `cpfCliente`.
pub fn value_by_client(records: &[ConsumptionRecord], prices: &dyn PriceTable) -> Totals<f64> {
    let mut totals = Totals::default();
    for r in records {
        totals.add(&r.client_cpf, prices.value_of_record(r));
    }
    totals
}

/// Sum of quantities per item code, regardless of which catalog knows it.
pub fn quantity_by_code(records: &[ConsumptionRecord]) -> Totals<u64> {
    let mut totals = Totals::default();
    for r in records {
        for item in &r.items {
            totals.add(&item.code, item.quantity);
        }
    }
    totals
}

/// Per-code totals for one breed of one pet type.
#[derive(Debug, Clone, PartialEq)]
pub struct BreedTotals {
    pub breed: String,
    pub codes: Totals<u64>,
}

/// All breeds seen for one pet type.
#[derive(Debug, Clone, PartialEq)]
pub struct KindTotals {
    pub kind: String,
    pub breeds: Vec<BreedTotals>,
}

/// Quantities grouped by `(pet type, breed, code)`.
///
/// A record whose pet cannot be resolved is skipped as a whole, items and
/// all. Types and breeds keep first-seen order.
pub fn quantity_by_pet_breed(
    records: &[ConsumptionRecord],
    pets: &Index<'_, Pet>,
) -> Vec<KindTotals> {
    let mut kinds: Vec<KindTotals> = Vec::new();
    let mut skipped = 0usize;

    for r in records {
        let Some(pet) = pets.get(&r.pet_id) else {
            skipped += 1;
            continue;
        };

        let kind_idx = match kinds.iter().position(|k| k.kind == pet.kind) {
            Some(idx) => idx,
            None => {
                kinds.push(KindTotals {
                    kind: pet.kind.clone(),
                    breeds: Vec::new(),
                });
                kinds.len() - 1
            }
        };
        let breeds = &mut kinds[kind_idx].breeds;

        let breed_idx = match breeds.iter().position(|b| b.breed == pet.breed) {
            Some(idx) => idx,
            None => {
                breeds.push(BreedTotals {
                    breed: pet.breed.clone(),
                    codes: Totals::default(),
                });
                breeds.len() - 1
            }
        };

        for item in &r.items {
            breeds[breed_idx].codes.add(&item.code, item.quantity);
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "consumptions with unknown pet left out of breed totals");
    }

    kinds
}
