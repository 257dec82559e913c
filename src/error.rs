// ⚠️ Error taxonomy
// Row-level errors are recovered locally by the loader; everything else
// surfaces to the operator through the menu driver.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single store row was rejected during load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("cost {0:?} is not a non-negative number")]
    InvalidCost(String),

    #[error("quantity {0:?} is not a non-negative whole number")]
    InvalidQuantity(String),

    /// The csv layer could not decode the row (e.g. invalid UTF-8)
    #[error("malformed row: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("no records in inventory")]
    EmptyInventory,

    #[error("could not access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write store data: {0}")]
    Csv(#[from] csv::Error),

    #[error("no record at position {index} (inventory holds {len})")]
    NoSuchRecord { index: usize, len: usize },

    #[error("adding {added} to {current} units overflows the quantity field")]
    QuantityOverflow { current: u64, added: u64 },
}

impl InventoryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InventoryError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the backing file simply does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            InventoryError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_messages() {
        let err = RowError::FieldCount { expected: 5, found: 2 };
        assert_eq!(err.to_string(), "expected 5 fields, found 2");

        let err = RowError::InvalidCost("abc".to_string());
        assert!(err.to_string().contains("\"abc\""));
    }

    #[test]
    fn test_not_found_detection() {
        let err = InventoryError::io(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing.txt"));

        let err = InventoryError::io(
            "locked.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_not_found());
        assert!(!InventoryError::EmptyInventory.is_not_found());
    }
}
