/// Currency used to display monetary rankings. Catalog prices are already
/// in this currency; nothing is converted.
#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    pub symbol: String,
    pub code: String,
}

pub const DEFAULT_CURRENCY: &str = "BRL";

impl Currency {
    pub fn from_code(code: &str) -> Self {
        let code = code.to_uppercase();
        let symbol = match currency_symbol(&code) {
            "" => format!("{code} "),
            s => s.to_string(),
        };
        Self { symbol, code }
    }

    pub fn format(&self, value: f64) -> String {
        format!("{}{:.2}", self.symbol, value)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::from_code(DEFAULT_CURRENCY)
    }
}

fn currency_symbol(code: &str) -> &str {
    match code {
        "BRL" => "R$ ",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "ARS" => "AR$ ",
        "CLP" => "CLP$ ",
        "MXN" => "MX$",
        "PYG" => "₲",
        "UYU" => "$U ",
        "CAD" => "CA$",
        "CHF" => "CHF ",
        _ => "",
    }
}
