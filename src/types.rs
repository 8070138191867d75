use serde::{Deserialize, Serialize};

/// Display name used for a ranking row whose key is missing from the catalog
/// it was resolved against.
pub const NOT_FOUND: &str = "not found";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub cpf: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nomeSocial", default)]
    pub social_name: String,
    #[serde(rename = "dataEmissao", default)]
    pub issued_on: String,
    #[serde(default)]
    pub rgs: Vec<String>,
    #[serde(rename = "telefones", default)]
    pub phones: Vec<String>,
    #[serde(rename = "dataCadastro", default)]
    pub registered_on: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "genero", default)]
    pub gender: String,
    #[serde(rename = "raca")]
    pub breed: String,
    #[serde(rename = "cpfDono")]
    pub owner_cpf: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
    /// Duration in minutes.
    #[serde(rename = "duracao", default)]
    pub duration: f64,
}

/// One line of a consumption: a product or service code and how many units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionItem {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "quantidade")]
    pub quantity: u64,
}

/// An append-only transaction linking a client, a pet and the items consumed.
/// Neither the client nor the pet is guaranteed to still exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    #[serde(rename = "cpfCliente")]
    pub client_cpf: String,
    #[serde(rename = "idPet")]
    pub pet_id: u64,
    #[serde(rename = "itens", default)]
    pub items: Vec<ConsumptionItem>,
    #[serde(rename = "data", default)]
    pub date: String,
}

impl ConsumptionRecord {
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .fold(0, |total, i| total.saturating_add(i.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientQuantityRow {
    pub cpf: String,
    pub name: String,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientValueRow {
    pub cpf: String,
    pub name: String,
    pub value: f64,
}

/// A product or service row: code, catalog name (or [`NOT_FOUND`]) and
/// consumed quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeRow {
    pub code: String,
    pub name: String,
    pub total: u64,
}
