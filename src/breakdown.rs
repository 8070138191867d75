use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::aggregate::{quantity_by_pet_breed, KindTotals};
use crate::index::{Index, Keyed};
use crate::rank::{top_n, Unresolved};
use crate::types::{CodeRow, ConsumptionRecord, Pet, Product, Service};

/// Consumption per code for one breed.
#[derive(Debug, Clone, PartialEq)]
pub struct BreedBreakdown {
    pub breed: String,
    pub rows: Vec<CodeRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KindBreakdown {
    pub kind: String,
    pub breeds: Vec<BreedBreakdown>,
}

/// Pet type → breed → consumed codes.
///
/// Types and breeds are in first-seen order. Rows are sorted by total
/// descending, ties in first-seen order, and are never truncated or
/// filtered: codes the catalog does not know are named [`crate::types::NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Breakdown {
    pub kinds: Vec<KindBreakdown>,
}

impl Breakdown {
    pub fn get(&self, kind: &str, breed: &str) -> Option<&[CodeRow]> {
        self.kinds
            .iter()
            .find(|k| k.kind == kind)?
            .breeds
            .iter()
            .find(|b| b.breed == breed)
            .map(|b| b.rows.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

fn build<T: Keyed<Key = str>>(grouped: Vec<KindTotals>, catalog: &Index<'_, T>) -> Breakdown {
    let kinds = grouped
        .into_iter()
        .map(|k| KindBreakdown {
            kind: k.kind,
            breeds: k
                .breeds
                .into_iter()
                .map(|b| BreedBreakdown {
                    breed: b.breed,
                    rows: top_n(
                        &b.codes,
                        |code| catalog.name_of(code),
                        usize::MAX,
                        Unresolved::Keep,
                    )
                    .into_iter()
                    .map(|r| CodeRow {
                        code: r.key,
                        name: r.name,
                        total: r.total,
                    })
                    .collect(),
                })
                .collect(),
        })
        .collect();

    Breakdown { kinds }
}

/// Every code consumed per pet type and breed, named from the product
/// catalog. Consumptions of unknown pets are skipped whole.
pub fn breakdown_products_by_pet_type_and_breed(
    products: &[Product],
    consumptions: &[ConsumptionRecord],
    pets: &[Pet],
) -> Breakdown {
    let grouped = quantity_by_pet_breed(consumptions, &Index::new(pets));
    build(grouped, &Index::new(products))
}

/// Same as [`breakdown_products_by_pet_type_and_breed`], named from the
/// service catalog.
pub fn breakdown_services_by_pet_type_and_breed(
    services: &[Service],
    consumptions: &[ConsumptionRecord],
    pets: &[Pet],
) -> Breakdown {
    let grouped = quantity_by_pet_breed(consumptions, &Index::new(pets));
    build(grouped, &Index::new(services))
}

struct Breeds<'a>(&'a [BreedBreakdown]);

impl Serialize for Breeds<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for b in self.0 {
            map.serialize_entry(&b.breed, &b.rows)?;
        }
        map.end()
    }
}

/// Serialized as nested objects `{ tipo: { raca: [rows] } }` in first-seen order.
impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.kinds.len()))?;
        for k in &self.kinds {
            map.serialize_entry(&k.kind, &Breeds(&k.breeds))?;
        }
        map.end()
    }
}
