//! Grouping of discovered columns by owning table.

use std::collections::HashMap;

use tzc_core::entities::{TableGroup, TemporalColumn};

/// Group columns by table.
///
/// Tables appear in first-seen order and columns keep their input order, so
/// for the table-then-column sorted metadata result, flattening the groups
/// gives back the input sequence unchanged.
#[must_use]
pub fn group_by_table(columns: Vec<TemporalColumn>) -> Vec<TableGroup> {
    let mut groups: Vec<TableGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for column in columns {
        let slot = *index
            .entry(column.table_name.clone())
            .or_insert_with(|| {
                groups.push(TableGroup::new(column.table_name.clone()));
                groups.len() - 1
            });
        groups[slot].columns.push(column);
    }

    groups
}

/// Total number of columns across all groups.
#[must_use]
pub fn column_count(groups: &[TableGroup]) -> usize {
    groups.iter().map(|g| g.columns.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn col(table: &str, column: &str) -> TemporalColumn {
        TemporalColumn::from_metadata_row(table, column, "datetime", true).unwrap()
    }

    #[test]
    fn flattening_reproduces_sorted_input() {
        let input = vec![
            col("invoices", "issued_at"),
            col("orders", "placed_at"),
            col("orders", "shipped_at"),
            col("users", "created_at"),
        ];

        let groups = group_by_table(input.clone());
        let names: Vec<_> = groups.iter().map(|g| g.table_name.as_str()).collect();
        assert_eq!(names, vec!["invoices", "orders", "users"]);

        let flattened: Vec<_> = groups.into_iter().flat_map(|g| g.columns).collect();
        assert_eq!(flattened, input);
    }

    #[test]
    fn interleaved_tables_merge_in_first_seen_order() {
        let groups = group_by_table(vec![
            col("b", "x"),
            col("a", "y"),
            col("b", "z"),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].table_name, "b");
        assert_eq!(groups[0].column_names(), vec!["x", "z"]);
        assert_eq!(groups[1].table_name, "a");
        assert_eq!(column_count(&groups), 3);
    }

    #[test]
    fn empty_input_gives_no_groups() {
        assert!(group_by_table(Vec::new()).is_empty());
    }
}
