//! Column Classifier Module
//! Splits a table into numeric and non-numeric sub-tables.

use super::loader::{Table, ValueKind};
use polars::prelude::PlSmallStr;

/// The two halves of a classified table. Both keep every source row.
#[derive(Debug, Clone)]
pub struct Classified {
    pub numeric: Table,
    pub non_numeric: Table,
}

/// Partitions columns by value kind.
pub struct ColumnClassifier;

impl ColumnClassifier {
    /// Split a table into its numeric and non-numeric columns.
    pub fn split(table: &Table) -> Classified {
        Classified {
            numeric: Self::numeric(table),
            non_numeric: Self::non_numeric(table),
        }
    }

    /// Integer and float columns, in source order.
    pub fn numeric(table: &Table) -> Table {
        Self::select(table, |kind| kind.is_numeric())
    }

    /// Text, boolean and all-missing columns, in source order.
    pub fn non_numeric(table: &Table) -> Table {
        Self::select(table, |kind| !kind.is_numeric())
    }

    fn select(table: &Table, keep: impl Fn(ValueKind) -> bool) -> Table {
        let rejected: Vec<PlSmallStr> = table
            .columns()
            .iter()
            .filter(|col| !keep(ValueKind::of(col)))
            .map(|col| col.name().clone())
            .collect();
        table.without_columns(rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sample() -> Table {
        let df = DataFrame::new(vec![
            Column::new("age".into(), vec![Some(31i64), Some(45), Some(27)]),
            Column::new("city".into(), vec!["Oslo", "Lima", "Pune"]),
            Column::new("income".into(), vec![Some(1.5f64), None, Some(3.0)]),
            Column::new("member".into(), vec![true, false, true]),
        ])
        .unwrap();
        Table::new(df)
    }

    #[test]
    fn splits_by_kind_in_source_order() {
        let table = sample();
        let classified = ColumnClassifier::split(&table);

        assert_eq!(classified.numeric.column_names(), vec!["age", "income"]);
        assert_eq!(classified.non_numeric.column_names(), vec!["city", "member"]);
        assert_eq!(classified.numeric.row_count(), 3);
        assert_eq!(classified.non_numeric.row_count(), 3);
    }

    #[test]
    fn halves_are_disjoint_and_cover_the_table() {
        let table = sample();
        let classified = ColumnClassifier::split(&table);

        let mut union = classified.numeric.column_names();
        union.extend(classified.non_numeric.column_names());
        for name in classified.numeric.column_names() {
            assert!(!classified.non_numeric.column_names().contains(&name));
        }
        union.sort();
        let mut expected = table.column_names();
        expected.sort();
        assert_eq!(union, expected);
    }

    #[test]
    fn empty_half_keeps_row_count() {
        let df = DataFrame::new(vec![Column::new("name".into(), vec!["a", "b"])]).unwrap();
        let table = Table::new(df);
        let numeric = ColumnClassifier::numeric(&table);

        assert_eq!(numeric.column_count(), 0);
        assert_eq!(numeric.row_count(), 2);
    }

    #[test]
    fn zero_row_table_splits_cleanly() {
        let df = DataFrame::new(vec![
            Column::new("x".into(), Vec::<i64>::new()),
            Column::new("label".into(), Vec::<String>::new()),
        ])
        .unwrap();
        let classified = ColumnClassifier::split(&Table::new(df));

        assert_eq!(classified.numeric.column_names(), vec!["x"]);
        assert_eq!(classified.non_numeric.column_names(), vec!["label"]);
        assert_eq!(classified.numeric.row_count(), 0);
    }
}
