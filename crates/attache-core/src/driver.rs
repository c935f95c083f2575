pub mod operation;
pub use operation::Operation;

mod response;
pub use response::{Response, Rows};

use crate::{schema::Schema, Result};

use std::fmt::Debug;

/// The storage contract. Synchronous: every operation runs to completion
/// before returning.
pub trait Driver: Debug + 'static {
    /// Register the schema with the driver.
    fn register_schema(&mut self, schema: &Schema) -> Result<()>;

    /// Execute a storage operation.
    fn exec(&mut self, schema: &Schema, op: Operation) -> Result<Response>;

    /// Clear all stored data.
    fn reset(&mut self, schema: &Schema) -> Result<()>;
}
