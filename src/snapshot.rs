use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::breakdown::{
    breakdown_products_by_pet_type_and_breed, breakdown_services_by_pet_type_and_breed, Breakdown,
};
use crate::history::{client_history, HistoryEntry};
use crate::rank;
use crate::types::{
    Client, ClientQuantityRow, ClientValueRow, CodeRow, ConsumptionRecord, Pet, Product, Service,
};

/// Date formats accepted in a consumption's `data` field.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Frozen copy of everything the engine reads.
///
/// Queries borrow the snapshot immutably, so it cannot change while one
/// runs. A host holding live state takes a fresh snapshot per query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub pets: Vec<Pet>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(rename = "consumos", default)]
    pub consumptions: Vec<ConsumptionRecord>,
}

/// Exactly six ASCII digits.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a consumption date in any of the accepted formats.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    Snapshot::from_json_str(&data)
        .with_context(|| format!("Invalid snapshot {}", path.display()))
}

impl Snapshot {
    pub fn from_json_str(data: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(data).context("Malformed snapshot JSON")?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Boundary checks the engine itself never repeats. Dangling references
    /// between collections are allowed.
    pub fn validate(&self) -> Result<()> {
        let mut cpfs = HashSet::new();
        for c in &self.clients {
            if !cpfs.insert(c.cpf.as_str()) {
                bail!("duplicate client CPF {}", c.cpf);
            }
        }

        let mut pet_ids = HashSet::new();
        for p in &self.pets {
            if !pet_ids.insert(p.id) {
                bail!("duplicate pet id {}", p.id);
            }
        }

        let mut codes = HashSet::new();
        for p in &self.products {
            if !is_valid_code(&p.code) {
                bail!("product code {:?} must be exactly 6 digits", p.code);
            }
            if !codes.insert(p.code.as_str()) {
                bail!("duplicate product code {}", p.code);
            }
        }

        codes.clear();
        for s in &self.services {
            if !is_valid_code(&s.code) {
                bail!("service code {:?} must be exactly 6 digits", s.code);
            }
            if !codes.insert(s.code.as_str()) {
                bail!("duplicate service code {}", s.code);
            }
        }

        for (n, c) in self.consumptions.iter().enumerate() {
            if c.items.is_empty() {
                bail!("consumption #{n} has no items");
            }
            for item in &c.items {
                if !is_valid_code(&item.code) {
                    bail!(
                        "consumption #{n}: item code {:?} must be exactly 6 digits",
                        item.code
                    );
                }
                if item.quantity == 0 {
                    bail!("consumption #{n}: item {} has zero quantity", item.code);
                }
            }
        }

        Ok(())
    }

    /// A copy whose consumption log only keeps records dated inside the
    /// inclusive range. Records with an unparseable date are dropped.
    pub fn between(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Snapshot {
        let consumptions = self
            .consumptions
            .iter()
            .filter(|c| {
                let Some(date) = parse_date(&c.date) else {
                    tracing::debug!(date = %c.date, "dropping consumption with unparseable date");
                    return false;
                };
                from.map_or(true, |f| date >= f) && to.map_or(true, |t| date <= t)
            })
            .cloned()
            .collect();

        Snapshot {
            clients: self.clients.clone(),
            pets: self.pets.clone(),
            products: self.products.clone(),
            services: self.services.clone(),
            consumptions,
        }
    }

    pub fn rank_clients_by_quantity(&self, limit: usize) -> Vec<ClientQuantityRow> {
        rank::rank_clients_by_quantity(&self.clients, &self.consumptions, limit)
    }

    pub fn rank_clients_by_value(&self, limit: usize) -> Vec<ClientValueRow> {
        rank::rank_clients_by_value(
            &self.clients,
            &self.consumptions,
            &self.products,
            &self.services,
            limit,
        )
    }

    pub fn rank_products(&self, limit: usize) -> Vec<CodeRow> {
        rank::rank_products(&self.products, &self.consumptions, limit)
    }

    pub fn rank_services(&self, limit: usize) -> Vec<CodeRow> {
        rank::rank_services(&self.services, &self.consumptions, limit)
    }

    pub fn products_by_pet_type_and_breed(&self) -> Breakdown {
        breakdown_products_by_pet_type_and_breed(&self.products, &self.consumptions, &self.pets)
    }

    pub fn services_by_pet_type_and_breed(&self) -> Breakdown {
        breakdown_services_by_pet_type_and_breed(&self.services, &self.consumptions, &self.pets)
    }

    pub fn client_history(&self, cpf: &str) -> Vec<HistoryEntry> {
        client_history(cpf, &self.consumptions, &self.pets)
    }
}
