use crate::index::Index;
use crate::types::{ConsumptionItem, ConsumptionRecord, Product, Service};

/// Catalog a price was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Product,
    Service,
}

/// Order in which catalogs are probed for a code's price. A code present in
/// both catalogs is priced as a product.
pub const PRICE_PRECEDENCE: [PriceSource; 2] = [PriceSource::Product, PriceSource::Service];

/// Trait for looking up the price per consumed unit of a code.
pub trait PriceTable {
    /// Price of one unit, or `None` when no catalog knows the code.
    fn lookup(&self, code: &str) -> Option<(PriceSource, f64)>;

    /// Unknown codes are worth nothing.
    fn price_of(&self, code: &str) -> f64 {
        self.lookup(code).map(|(_, price)| price).unwrap_or(0.0)
    }

    fn value_of_item(&self, item: &ConsumptionItem) -> f64 {
        item.quantity as f64 * self.price_of(&item.code)
    }

    fn value_of_record(&self, record: &ConsumptionRecord) -> f64 {
        record.items.iter().map(|i| self.value_of_item(i)).sum()
    }

    /// Codes that appeared in records but have no price in any catalog.
    fn unpriced_codes(&self, records: &[ConsumptionRecord]) -> Vec<String> {
        let mut codes: Vec<String> = records
            .iter()
            .flat_map(|r| r.items.iter().map(|i| i.code.clone()))
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .filter(|c| self.lookup(c).is_none())
            .collect();
        codes.sort();
        codes
    }
}

/// Product and service prices kept in two separate maps.
pub struct CatalogPrices<'a> {
    products: Index<'a, Product>,
    services: Index<'a, Service>,
}

impl<'a> CatalogPrices<'a> {
    pub fn new(products: &'a [Product], services: &'a [Service]) -> Self {
        Self {
            products: Index::new(products),
            services: Index::new(services),
        }
    }

    fn probe(&self, source: PriceSource, code: &str) -> Option<f64> {
        match source {
            PriceSource::Product => self.products.get(code).map(|p| p.price),
            PriceSource::Service => self.services.get(code).map(|s| s.price),
        }
    }
}

impl PriceTable for CatalogPrices<'_> {
    fn lookup(&self, code: &str) -> Option<(PriceSource, f64)> {
        PRICE_PRECEDENCE
            .iter()
            .find_map(|&source| self.probe(source, code).map(|price| (source, price)))
    }
}
