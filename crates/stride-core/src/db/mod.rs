//! SQLite persistence for plans, their week/day/session trees and the
//! exercise library.
//!
//! Every write is one transaction. Loading functions take a plain
//! [`rusqlite::Connection`] so they can also run inside an open
//! transaction and observe its uncommitted rows.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod exercise_queries;
pub mod migrations;
pub mod plan_queries;
pub mod progress_queries;
mod rows;

pub use plan_queries::load_hierarchy;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Direct access to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}
