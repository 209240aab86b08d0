//! Inventory module - results of the bounded directory scan.

mod scan;

pub use scan::{InventoryScan, ItemSummary, ScanAdvisory, StatusCounts};
