//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Cascading deletes rely on this, and it is per connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Brings databases created by older releases up to date.
    fn apply_migrations(&self) -> Result<()> {
        // Template support added the is_prebuilt flag
        let has_prebuilt_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('plans') WHERE name = 'is_prebuilt'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect plans table")?;

        if !has_prebuilt_column {
            self.connection
                .execute(
                    "ALTER TABLE plans ADD COLUMN is_prebuilt INTEGER NOT NULL DEFAULT 0",
                    [],
                )
                .db_context("Failed to add is_prebuilt column to plans table")?;
        }

        Ok(())
    }
}
