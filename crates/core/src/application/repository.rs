// Specification Repository - applies a compound and executes it

use crate::application::SpecificationCompound;
use crate::domain::{ResultShape, Value};
use crate::error::{AppError, Result};
use crate::port::{ManagerRegistry, Query};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Outcome of [`SpecificationRepository::find`], one variant per result shape
#[derive(Debug, Clone, PartialEq)]
pub enum FindResult<T> {
    Many(Vec<T>),
    One(Option<T>),
    Scalar(Value),
}

impl<T> FindResult<T> {
    pub fn shape(&self) -> ResultShape {
        match self {
            FindResult::Many(_) => ResultShape::ManyObjects,
            FindResult::One(_) => ResultShape::SingleObject,
            FindResult::Scalar(_) => ResultShape::SingleScalar,
        }
    }

    pub fn into_many(self) -> Result<Vec<T>> {
        match self {
            FindResult::Many(items) => Ok(items),
            other => Err(shape_mismatch(ResultShape::ManyObjects, other.shape())),
        }
    }

    pub fn into_one(self) -> Result<Option<T>> {
        match self {
            FindResult::One(item) => Ok(item),
            other => Err(shape_mismatch(ResultShape::SingleObject, other.shape())),
        }
    }

    pub fn into_scalar(self) -> Result<Value> {
        match self {
            FindResult::Scalar(value) => Ok(value),
            other => Err(shape_mismatch(ResultShape::SingleScalar, other.shape())),
        }
    }
}

fn shape_mismatch(expected: ResultShape, actual: ResultShape) -> AppError {
    AppError::InvalidState(format!(
        "Expected a {} compound, got {}",
        expected, actual
    ))
}

/// Executes specification compounds against managed entities
pub struct SpecificationRepository {
    registry: Arc<dyn ManagerRegistry>,
}

impl SpecificationRepository {
    pub fn new(registry: Arc<dyn ManagerRegistry>) -> Self {
        Self { registry }
    }

    /// Build and compile the query for a compound without executing it
    ///
    /// 1. Resolve the entity manager
    /// 2. Create a fresh builder
    /// 3. Apply every `modify_builder` hook, in registration order
    /// 4. Compile
    /// 5. Apply every `modify_query` hook, in registration order
    pub fn prepare(&self, compound: &SpecificationCompound) -> Result<Box<dyn Query>> {
        let manager = self.registry.resolve(compound.manager())?;

        debug!(
            manager = %manager.name(),
            shape = %compound.result_shape(),
            specifications = compound.len(),
            "Preparing specification compound"
        );

        let mut builder = manager.create_query_builder();
        for specification in compound.specifications() {
            specification.modify_builder(builder.as_mut());
        }

        let mut query = builder.get_query()?;
        for specification in compound.specifications() {
            specification.modify_query(query.as_mut());
        }

        Ok(query)
    }

    /// Execute a compound according to its declared result shape
    ///
    /// # Errors
    /// - `NonUniqueResult` when a single-object or scalar compound matches several rows
    /// - `NoResult` when a scalar compound matches nothing
    /// - driver and hydration errors, unmodified
    pub async fn find<T: DeserializeOwned>(
        &self,
        compound: &SpecificationCompound,
    ) -> Result<FindResult<T>> {
        let mut query = self.prepare(compound)?;

        let result = match compound.result_shape() {
            ResultShape::ManyObjects => {
                let rows = query.get_result().await?;
                let items = rows
                    .iter()
                    .map(|row| row.hydrate())
                    .collect::<Result<Vec<T>>>()?;
                FindResult::Many(items)
            }
            ResultShape::SingleObject => {
                let row = query.get_one_or_null_result().await?;
                FindResult::One(row.map(|r| r.hydrate()).transpose()?)
            }
            ResultShape::SingleScalar => {
                FindResult::Scalar(query.get_single_scalar_result().await?)
            }
        };

        debug!(shape = %result.shape(), "Specification compound executed");
        Ok(result)
    }

    /// Execute a many-objects compound
    pub async fn find_many<T: DeserializeOwned>(
        &self,
        compound: &SpecificationCompound,
    ) -> Result<Vec<T>> {
        expect_shape(compound, ResultShape::ManyObjects)?;
        self.find(compound).await?.into_many()
    }

    /// Execute a single-object compound
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        compound: &SpecificationCompound,
    ) -> Result<Option<T>> {
        expect_shape(compound, ResultShape::SingleObject)?;
        self.find(compound).await?.into_one()
    }

    /// Execute a single-scalar compound
    pub async fn find_scalar(&self, compound: &SpecificationCompound) -> Result<Value> {
        expect_shape(compound, ResultShape::SingleScalar)?;
        self.find::<serde_json::Value>(compound)
            .await?
            .into_scalar()
    }
}

fn expect_shape(compound: &SpecificationCompound, expected: ResultShape) -> Result<()> {
    if compound.result_shape() == expected {
        Ok(())
    } else {
        Err(shape_mismatch(expected, compound.result_shape()))
    }
}
