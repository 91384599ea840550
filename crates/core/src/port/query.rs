// Query Port (Interface)

use crate::domain::{Row, Value};
use crate::error::{AppError, Result};
use async_trait::async_trait;

/// Compiled, executable query
#[async_trait]
pub trait Query: Send {
    /// Limit the number of returned rows (`None` removes the limit)
    fn set_max_results(&mut self, max_results: Option<u64>);

    /// Skip this many rows before returning results
    fn set_first_result(&mut self, first_result: u64);

    fn max_results(&self) -> Option<u64>;

    fn first_result(&self) -> u64;

    /// Entity-level query text
    fn dql(&self) -> String;

    /// Driver-level SQL as it will be sent
    fn sql(&self) -> Result<String>;

    /// Fetch all rows in result order
    async fn get_result(&mut self) -> Result<Vec<Row>>;

    /// Fetch at most one row
    ///
    /// # Errors
    /// `NonUniqueResult` when more than one row matches
    async fn get_one_or_null_result(&mut self) -> Result<Option<Row>> {
        let mut rows = self.get_result().await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(AppError::NonUniqueResult(format!(
                "Expected at most one row, query returned {}",
                n
            ))),
        }
    }

    /// Fetch exactly one row and return its first column
    ///
    /// # Errors
    /// `NoResult` when no row matches, `NonUniqueResult` when several rows
    /// match or the row has more than one column
    async fn get_single_scalar_result(&mut self) -> Result<Value> {
        let rows = self.get_result().await?;
        match rows.as_slice() {
            [] => Err(AppError::NoResult(
                "Expected one scalar row, query returned none".to_string(),
            )),
            [row] if row.len() > 1 => Err(AppError::NonUniqueResult(format!(
                "Expected one scalar column, row has {}",
                row.len()
            ))),
            [row] => row.first().cloned().ok_or_else(|| {
                AppError::NoResult("Scalar row has no columns".to_string())
            }),
            many => Err(AppError::NonUniqueResult(format!(
                "Expected one scalar row, query returned {}",
                many.len()
            ))),
        }
    }
}
