// 👟 Record - one inventory line
// Field order here is the store file's column order.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Manufacturing origin / location
    pub origin: String,

    /// Lookup key, not unique
    pub code: String,

    /// Display label
    pub name: String,

    pub unit_cost: f64,

    pub quantity: u64,
}

impl Record {
    pub fn new(
        origin: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        unit_cost: f64,
        quantity: u64,
    ) -> Self {
        Record {
            origin: origin.into(),
            code: code.into(),
            name: name.into(),
            unit_cost,
            quantity,
        }
    }

    /// Stock value: unit cost times quantity, unrounded
    pub fn value(&self) -> f64 {
        self.unit_cost * self.quantity as f64
    }
}

/// Summary form used by search, re-stock and highest quantity
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} units available",
            self.name, self.origin, self.quantity
        )
    }
}

// ============================================================================
// FIELD SELECTION
// ============================================================================

/// Column selector for tabular rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Origin,
    Code,
    Name,
    Cost,
    Quantity,
    /// Derived: cost * quantity
    Value,
}

impl Field {
    /// Columns shown by "view all"
    pub const ALL: [Field; 5] = [
        Field::Origin,
        Field::Code,
        Field::Name,
        Field::Cost,
        Field::Quantity,
    ];

    /// Columns shown by "value per item"
    pub const VALUATION: [Field; 2] = [Field::Name, Field::Value];

    pub fn header(&self) -> &'static str {
        match self {
            Field::Origin => "Country",
            Field::Code => "Code",
            Field::Name => "Product",
            Field::Cost => "Cost",
            Field::Quantity => "Quantity",
            Field::Value => "Value",
        }
    }

    pub fn cell(&self, record: &Record) -> String {
        match self {
            Field::Origin => record.origin.clone(),
            Field::Code => record.code.clone(),
            Field::Name => record.name.clone(),
            Field::Cost => record.unit_cost.to_string(),
            Field::Quantity => record.quantity.to_string(),
            Field::Value => record.value().to_string(),
        }
    }

    /// Numeric columns are right-aligned in tables
    pub fn is_numeric(&self) -> bool {
        matches!(self, Field::Cost | Field::Quantity | Field::Value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display() {
        let record = Record::new("Vietnam", "SKU44386", "Air Max 90", 2300.0, 20);
        assert_eq!(
            record.to_string(),
            "Air Max 90 (Vietnam) - 20 units available"
        );
    }

    #[test]
    fn test_value_is_exact_product() {
        assert_eq!(Record::new("US", "C1", "Shoe A", 10.0, 5).value(), 50.0);
        assert_eq!(Record::new("US", "C2", "Shoe B", 0.0, 100).value(), 0.0);
        assert_eq!(Record::new("US", "C3", "Shoe C", 20.5, 3).value(), 61.5);
    }

    #[test]
    fn test_field_cells() {
        let record = Record::new("DE", "C2", "Shoe B", 20.5, 4);
        let cells: Vec<String> = Field::ALL.iter().map(|f| f.cell(&record)).collect();
        assert_eq!(cells, vec!["DE", "C2", "Shoe B", "20.5", "4"]);

        let cells: Vec<String> = Field::VALUATION.iter().map(|f| f.cell(&record)).collect();
        assert_eq!(cells, vec!["Shoe B", "82"]);
    }

    #[test]
    fn test_field_headers() {
        let headers: Vec<&str> = Field::ALL.iter().map(|f| f.header()).collect();
        assert_eq!(headers, vec!["Country", "Code", "Product", "Cost", "Quantity"]);
        assert!(Field::Value.is_numeric());
        assert!(!Field::Name.is_numeric());
    }
}
