use serde::Serialize;

use crate::index::Index;
use crate::types::{ConsumptionItem, ConsumptionRecord, Pet};

/// Pet as shown next to a past consumption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetLabel {
    pub name: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub date: String,
    /// `None` when the pet no longer exists.
    pub pet: Option<PetLabel>,
    pub items: Vec<ConsumptionItem>,
}

/// A client's consumptions in log order.
pub fn client_history(
    cpf: &str,
    consumptions: &[ConsumptionRecord],
    pets: &[Pet],
) -> Vec<HistoryEntry> {
    let pets = Index::new(pets);
    consumptions
        .iter()
        .filter(|c| c.client_cpf == cpf)
        .map(|c| HistoryEntry {
            date: c.date.clone(),
            pet: pets.get(&c.pet_id).map(|p| PetLabel {
                name: p.name.clone(),
                kind: p.kind.clone(),
            }),
            items: c.items.clone(),
        })
        .collect()
}

/// Pets registered to `cpf`, in collection order.
pub fn pets_of_client<'a>(cpf: &str, pets: &'a [Pet]) -> Vec<&'a Pet> {
    pets.iter().filter(|p| p.owner_cpf == cpf).collect()
}
