// 📦 Inventory - the store object
// Owns the ordered record sequence and the path it persists to.
// Queries borrow it; mutations take &mut and callers persist with save().

use crate::error::{InventoryError, Result};
use crate::record::Record;
use crate::store::{self, RejectedRow};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One row of the value-per-item report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemValue<'a> {
    pub name: &'a str,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct Inventory {
    path: PathBuf,
    records: Vec<Record>,
}

impl Inventory {
    /// Empty inventory bound to `path` (nothing is written yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_records(path, Vec::new())
    }

    pub fn with_records(path: impl Into<PathBuf>, records: Vec<Record>) -> Self {
        Inventory {
            path: path.into(),
            records,
        }
    }

    /// Load the store file, returning the rows that were skipped
    pub fn open(path: impl Into<PathBuf>) -> Result<(Self, Vec<RejectedRow>)> {
        let path = path.into();
        let report = store::load(&path)?;
        Ok((Self::with_records(path, report.records), report.rejected))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rewrite the whole backing file from memory
    pub fn save(&self) -> Result<()> {
        store::save(&self.path, &self.records)
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Append a new record at the end of the sequence
    pub fn capture(&mut self, record: Record) -> &Record {
        debug!(code = %record.code, "capturing record");
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Add `added` units to the record at `index`
    pub fn restock(&mut self, index: usize, added: u64) -> Result<&Record> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(InventoryError::NoSuchRecord { index, len })?;

        record.quantity = record
            .quantity
            .checked_add(added)
            .ok_or(InventoryError::QuantityOverflow {
                current: record.quantity,
                added,
            })?;

        debug!(code = %record.code, added, quantity = record.quantity, "restocked record");
        Ok(&*record)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// First record with the smallest quantity, with its position
    pub fn lowest_quantity(&self) -> Result<(usize, &Record)> {
        self.records
            .iter()
            .enumerate()
            .min_by_key(|(_, record)| record.quantity)
            .ok_or(InventoryError::EmptyInventory)
    }

    /// First record with the largest quantity
    pub fn highest_quantity(&self) -> Result<&Record> {
        // max_by_key keeps the last maximum; reduce keeps the first
        self.records
            .iter()
            .reduce(|best, record| {
                if record.quantity > best.quantity {
                    record
                } else {
                    best
                }
            })
            .ok_or(InventoryError::EmptyInventory)
    }

    /// Every record whose code matches exactly, in sequence order
    pub fn search(&self, code: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.code == code)
            .collect()
    }

    pub fn value_per_item(&self) -> Vec<ItemValue<'_>> {
        self.records
            .iter()
            .map(|record| ItemValue {
                name: &record.name,
                value: record.value(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn inventory(quantities: &[u64]) -> Inventory {
        let records = quantities
            .iter()
            .enumerate()
            .map(|(i, qty)| Record::new("US", format!("C{}", i), format!("Shoe {}", i), 10.0, *qty))
            .collect();
        Inventory::with_records("inventory.txt", records)
    }

    #[test]
    fn test_capture_appends_without_touching_existing() {
        let mut inv = inventory(&[5, 3]);
        let before = inv.records().to_vec();

        let added = inv.capture(Record::new("IT", "C9", "Loafer", 80.0, 2));
        assert_eq!(added.code, "C9");

        assert_eq!(inv.len(), before.len() + 1);
        assert_eq!(&inv.records()[..2], &before[..]);
        assert_eq!(inv.records()[2].name, "Loafer");
    }

    #[test]
    fn test_lowest_quantity_takes_first_tie() {
        let inv = inventory(&[7, 2, 9, 2]);
        let (index, record) = inv.lowest_quantity().unwrap();
        assert_eq!(index, 1);
        assert_eq!(record.code, "C1");
    }

    #[test]
    fn test_highest_quantity_takes_first_tie() {
        let inv = inventory(&[7, 9, 2, 9]);
        let record = inv.highest_quantity().unwrap();
        assert_eq!(record.code, "C1");
    }

    #[test]
    fn test_empty_inventory_queries_fail_cleanly() {
        let inv = Inventory::new("inventory.txt");
        assert!(matches!(
            inv.lowest_quantity(),
            Err(InventoryError::EmptyInventory)
        ));
        assert!(matches!(
            inv.highest_quantity(),
            Err(InventoryError::EmptyInventory)
        ));
        assert!(inv.value_per_item().is_empty());
        assert!(inv.search("C1").is_empty());
    }

    #[test]
    fn test_restock_increments_only_target() {
        let mut inv = inventory(&[5, 1, 8]);
        let (index, _) = inv.lowest_quantity().unwrap();

        let updated = inv.restock(index, 10).unwrap();
        assert_eq!(updated.quantity, 11);

        let quantities: Vec<u64> = inv.records().iter().map(|r| r.quantity).collect();
        assert_eq!(quantities, vec![5, 11, 8]);
    }

    #[test]
    fn test_restock_overflow_leaves_quantity() {
        let mut inv = inventory(&[u64::MAX - 1]);
        let err = inv.restock(0, 5).unwrap_err();
        assert!(matches!(err, InventoryError::QuantityOverflow { .. }));
        assert_eq!(inv.records()[0].quantity, u64::MAX - 1);
    }

    #[test]
    fn test_restock_bad_index() {
        let mut inv = inventory(&[1]);
        let err = inv.restock(3, 1).unwrap_err();
        assert!(matches!(err, InventoryError::NoSuchRecord { index: 3, len: 1 }));
    }

    #[test]
    fn test_search_returns_all_matches_in_order() {
        let inv = Inventory::with_records(
            "inventory.txt",
            vec![
                Record::new("US", "DUP", "First", 1.0, 1),
                Record::new("DE", "OTHER", "Second", 1.0, 1),
                Record::new("FR", "DUP", "Third", 1.0, 1),
            ],
        );

        let found = inv.search("DUP");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "First");
        assert_eq!(found[1].name, "Third");

        assert!(inv.search("dup").is_empty(), "search is case-sensitive");
        assert!(inv.search("MISSING").is_empty());
    }

    #[test]
    fn test_value_per_item() {
        let inv = Inventory::with_records(
            "inventory.txt",
            vec![
                Record::new("US", "C1", "Shoe A", 10.0, 5),
                Record::new("US", "C2", "Shoe B", 0.0, 100),
            ],
        );

        let values = inv.value_per_item();
        assert_eq!(
            values,
            vec![
                ItemValue { name: "Shoe A", value: 50.0 },
                ItemValue { name: "Shoe B", value: 0.0 },
            ]
        );
    }

    #[test]
    fn test_open_and_save_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.txt");
        std::fs::write(&path, "US,C1,Shoe A,10,5\nbroken\n").unwrap();

        let (mut inv, rejected) = Inventory::open(&path).unwrap();
        assert_eq!(inv.len(), 1);
        assert_eq!(rejected.len(), 1);

        inv.capture(Record::new("DE", "C2", "Shoe B", 20.5, 0));
        inv.save().unwrap();

        let (reloaded, rejected) = Inventory::open(&path).unwrap();
        assert_eq!(reloaded.records(), inv.records());
        assert!(rejected.is_empty(), "broken row is dropped on rewrite");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the re-stock candidate is a first minimum.
        #[test]
        fn lowest_is_first_minimum(quantities in prop::collection::vec(0u64..20, 1..30)) {
            let inv = inventory(&quantities);
            let (index, record) = inv.lowest_quantity().unwrap();

            prop_assert!(quantities.iter().all(|q| record.quantity <= *q));
            prop_assert!(quantities[..index].iter().all(|q| *q > record.quantity));
        }

        /// Property: the highest-quantity pick is a first maximum.
        #[test]
        fn highest_is_first_maximum(quantities in prop::collection::vec(0u64..20, 1..30)) {
            let inv = inventory(&quantities);
            let record = inv.highest_quantity().unwrap();
            let index = inv.records().iter().position(|r| std::ptr::eq(r, record)).unwrap();

            prop_assert!(quantities.iter().all(|q| record.quantity >= *q));
            prop_assert!(quantities[..index].iter().all(|q| *q < record.quantity));
        }
    }
}
