//! UPDATE statement generation.
//!
//! Identifiers are validated and backtick-quoted into the SQL text. Timezone
//! names never are: every `CONVERT_TZ` call takes them as two bound
//! parameters, from then to.

use tzc_core::entities::{TableGroup, TemporalColumn};
use tzc_core::enums::Strategy;
use tzc_core::identifier::{quote_identifier, validate_identifier};
use tzc_core::run::RunContext;
use tzc_db::Statement;

use crate::error::BuildError;

/// A statement (or the reason it could not be built) and the columns it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStatement {
    pub table_name: String,
    pub columns: Vec<String>,
    pub statement: Result<Statement, BuildError>,
}

#[derive(Debug, Clone, Copy)]
pub struct StatementBuilder<'a> {
    schema: &'a str,
    from_tz: &'a str,
    to_tz: &'a str,
}

impl<'a> StatementBuilder<'a> {
    #[must_use]
    pub fn new(ctx: &'a RunContext) -> Self {
        Self {
            schema: &ctx.schema,
            from_tz: &ctx.from_tz,
            to_tz: &ctx.to_tz,
        }
    }

    /// Plan every statement for one table under `strategy`.
    ///
    /// Build failures are kept in the plan rather than returned, so the
    /// executor can apply the halt-on-error policy to them like any other
    /// statement failure.
    #[must_use]
    pub fn plan(&self, strategy: Strategy, group: &TableGroup) -> Vec<PlannedStatement> {
        match strategy {
            Strategy::Combined => vec![PlannedStatement {
                table_name: group.table_name.clone(),
                columns: group.column_names(),
                statement: self.combined(group),
            }],
            Strategy::PerColumn => group
                .columns
                .iter()
                .map(|column| PlannedStatement {
                    table_name: group.table_name.clone(),
                    columns: vec![column.column_name.clone()],
                    statement: self.per_column(&group.table_name, column),
                })
                .collect(),
        }
    }

    /// One UPDATE converting every column of the table, no WHERE clause.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::EmptyTable` for a group without columns and
    /// `BuildError::InvalidIdentifier` if the table or any column name is unsafe.
    pub fn combined(&self, group: &TableGroup) -> Result<Statement, BuildError> {
        if group.columns.is_empty() {
            return Err(BuildError::EmptyTable {
                table: group.table_name.clone(),
            });
        }

        let target = self.target(&group.table_name)?;
        let mut assignments = Vec::with_capacity(group.columns.len());
        let mut params = Vec::with_capacity(group.columns.len() * 2);
        for column in &group.columns {
            assignments.push(assignment(&column.column_name)?);
            params.push(self.from_tz.to_string());
            params.push(self.to_tz.to_string());
        }

        Ok(Statement::new(
            format!("UPDATE {target} SET {}", assignments.join(", ")),
            params,
        ))
    }

    /// One UPDATE for a single column.
    ///
    /// Nullable columns get a `WHERE col IS NOT NULL` guard so NULLs are never
    /// handed to `CONVERT_TZ`; NOT NULL columns need none.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidIdentifier` if the table or column name is unsafe.
    pub fn per_column(
        &self,
        table_name: &str,
        column: &TemporalColumn,
    ) -> Result<Statement, BuildError> {
        let target = self.target(table_name)?;
        let set = assignment(&column.column_name)?;
        let sql = if column.is_nullable {
            format!(
                "UPDATE {target} SET {set} WHERE {} IS NOT NULL",
                quote_identifier(&column.column_name)
            )
        } else {
            format!("UPDATE {target} SET {set}")
        };

        Ok(Statement::new(
            sql,
            vec![self.from_tz.to_string(), self.to_tz.to_string()],
        ))
    }

    fn target(&self, table_name: &str) -> Result<String, BuildError> {
        validate_identifier(table_name).map_err(|source| BuildError::InvalidIdentifier {
            kind: "table",
            source,
        })?;
        // The schema was validated when the RunContext was built.
        Ok(format!(
            "{}.{}",
            quote_identifier(self.schema),
            quote_identifier(table_name)
        ))
    }
}

fn assignment(column_name: &str) -> Result<String, BuildError> {
    validate_identifier(column_name).map_err(|source| BuildError::InvalidIdentifier {
        kind: "column",
        source,
    })?;
    let quoted = quote_identifier(column_name);
    Ok(format!("{quoted} = CONVERT_TZ({quoted}, ?, ?)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tzc_core::run::RunOptions;

    fn ctx() -> RunContext {
        RunContext::new("shop", "+00:00", "+02:00", RunOptions::default()).unwrap()
    }

    fn col(table: &str, column: &str, nullable: bool) -> TemporalColumn {
        TemporalColumn::from_metadata_row(table, column, "datetime", nullable).unwrap()
    }

    fn group(table: &str, columns: Vec<TemporalColumn>) -> TableGroup {
        TableGroup {
            table_name: table.into(),
            columns,
        }
    }

    #[test]
    fn combined_converts_every_column_without_where() {
        let ctx = ctx();
        let builder = StatementBuilder::new(&ctx);
        let orders = group(
            "orders",
            vec![col("orders", "placed_at", true), col("orders", "shipped_at", false)],
        );

        let statement = builder.combined(&orders).unwrap();
        assert_eq!(
            statement.sql,
            "UPDATE `shop`.`orders` SET `placed_at` = CONVERT_TZ(`placed_at`, ?, ?), \
             `shipped_at` = CONVERT_TZ(`shipped_at`, ?, ?)"
        );
        assert_eq!(statement.params, vec!["+00:00", "+02:00", "+00:00", "+02:00"]);
    }

    #[test]
    fn per_column_guards_nullable_columns() {
        let ctx = ctx();
        let builder = StatementBuilder::new(&ctx);

        let statement = builder
            .per_column("orders", &col("orders", "placed_at", true))
            .unwrap();
        assert_eq!(
            statement.sql,
            "UPDATE `shop`.`orders` SET `placed_at` = CONVERT_TZ(`placed_at`, ?, ?) \
             WHERE `placed_at` IS NOT NULL"
        );
        assert_eq!(statement.params, vec!["+00:00", "+02:00"]);
    }

    #[test]
    fn per_column_skips_guard_for_not_null_columns() {
        let ctx = ctx();
        let builder = StatementBuilder::new(&ctx);

        let statement = builder
            .per_column("invoices", &col("invoices", "issued_at", false))
            .unwrap();
        assert_eq!(
            statement.sql,
            "UPDATE `shop`.`invoices` SET `issued_at` = CONVERT_TZ(`issued_at`, ?, ?)"
        );
    }

    #[test]
    fn timezones_are_bound_not_interpolated() {
        let ctx = RunContext::new(
            "shop",
            "UTC'); DROP TABLE orders; --",
            "Europe/Zurich",
            RunOptions::default(),
        )
        .unwrap();
        let builder = StatementBuilder::new(&ctx);

        let statement = builder
            .per_column("orders", &col("orders", "placed_at", true))
            .unwrap();
        assert!(!statement.sql.contains("DROP"));
        assert!(!statement.sql.contains("Europe"));
        assert_eq!(statement.params[0], "UTC'); DROP TABLE orders; --");
    }

    #[test]
    fn combined_rejects_empty_table() {
        let ctx = ctx();
        let builder = StatementBuilder::new(&ctx);
        assert_eq!(
            builder.combined(&group("orders", Vec::new())),
            Err(BuildError::EmptyTable {
                table: "orders".into()
            })
        );
    }

    #[rstest]
    #[case("placed at")]
    #[case("placed_at;")]
    #[case("placed'at")]
    #[case("placed`at")]
    fn invalid_column_is_a_build_error(#[case] name: &str) {
        let ctx = ctx();
        let builder = StatementBuilder::new(&ctx);
        let column = TemporalColumn {
            table_name: "orders".into(),
            column_name: name.into(),
            data_type: tzc_core::enums::TemporalType::Datetime,
            is_nullable: true,
        };

        let err = builder.per_column("orders", &column).unwrap_err();
        assert!(matches!(
            err,
            BuildError::InvalidIdentifier { kind: "column", .. }
        ));
    }

    #[test]
    fn invalid_table_is_a_build_error() {
        let ctx = ctx();
        let builder = StatementBuilder::new(&ctx);
        let err = builder
            .per_column("orders;drop", &col("orders;drop", "placed_at", true))
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::InvalidIdentifier { kind: "table", .. }
        ));
    }

    #[test]
    fn plan_per_column_isolates_bad_columns() {
        let ctx = ctx();
        let builder = StatementBuilder::new(&ctx);
        let mut bad = col("orders", "placed_at", true);
        bad.column_name = "bad name".into();
        let orders = group("orders", vec![bad, col("orders", "shipped_at", true)]);

        let plan = builder.plan(Strategy::PerColumn, &orders);
        assert_eq!(plan.len(), 2);
        assert!(plan[0].statement.is_err());
        assert!(plan[1].statement.is_ok());
        assert_eq!(plan[1].columns, vec!["shipped_at"]);
    }

    #[test]
    fn plan_combined_fails_whole_table_on_bad_column() {
        let ctx = ctx();
        let builder = StatementBuilder::new(&ctx);
        let mut bad = col("orders", "placed_at", true);
        bad.column_name = "bad name".into();
        let orders = group("orders", vec![bad, col("orders", "shipped_at", true)]);

        let plan = builder.plan(Strategy::Combined, &orders);
        assert_eq!(plan.len(), 1);
        assert!(plan[0].statement.is_err());
        assert_eq!(plan[0].columns, vec!["bad name", "shipped_at"]);
    }
}
