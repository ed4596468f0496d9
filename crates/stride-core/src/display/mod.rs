//! Display formatting and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! newtype wrappers cover collections and operation results. Everything is
//! markdown so the CLI can render it with termimad and the MCP server can
//! hand it to a client unchanged.
//!
//! - [`collections`]: Collection wrappers (PlanSummaries, Exercises)
//! - [`results`]: Operation results (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: Confirmation messages (OperationStatus)
//! - [`datetime`]: Local timestamp formatting
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use stride_core::display::OperationStatus;
//!
//! let status = OperationStatus::failure("Session 12 not found".to_string());
//! assert_eq!(status.to_string(), "Error: Session 12 not found\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Exercises, PlanSummaries};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
