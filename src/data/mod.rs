//! Data module - CSV loading and column classification

mod classifier;
mod loader;

pub use classifier::{Classified, ColumnClassifier};
pub use loader::{DataLoader, Table, ValueKind};
