// Specification Compound - ordered specifications plus a result shape

use crate::application::specifications::{
    DumpDql, DumpSql, LimitResultsMaxCount, LimitResultsOffset, LimitResultsPaginate, OrderBy,
    WhereField,
};
use crate::application::{CallbackBuilder, Specification};
use crate::domain::{ManagerSelector, ResultShape, Value};
use crate::error::Result;
use crate::port::QueryBuilder;
use std::sync::Arc;

/// Immutable, ordered set of specifications describing one logical query
///
/// Built through [`CompoundBuilder`]; once built it can no longer change, so
/// handing the same compound to several `find` calls is safe.
#[derive(Clone)]
pub struct SpecificationCompound {
    specifications: Arc<[Arc<dyn Specification>]>,
    result_shape: ResultShape,
    manager: ManagerSelector,
}

impl SpecificationCompound {
    pub fn builder(result_shape: ResultShape, initial: impl Specification + 'static) -> CompoundBuilder {
        CompoundBuilder {
            specifications: vec![Arc::new(initial)],
            result_shape,
            manager: ManagerSelector::Default,
        }
    }

    /// Compound returning every matching row
    pub fn many_objects(initial: impl Specification + 'static) -> CompoundBuilder {
        Self::builder(ResultShape::ManyObjects, initial)
    }

    /// Compound returning one row or none
    pub fn single_object(initial: impl Specification + 'static) -> CompoundBuilder {
        Self::builder(ResultShape::SingleObject, initial)
    }

    /// Compound returning one scalar value
    pub fn single_scalar(initial: impl Specification + 'static) -> CompoundBuilder {
        Self::builder(ResultShape::SingleScalar, initial)
    }

    /// Specifications in registration order
    pub fn specifications(&self) -> &[Arc<dyn Specification>] {
        &self.specifications
    }

    pub fn result_shape(&self) -> ResultShape {
        self.result_shape
    }

    pub fn manager(&self) -> &ManagerSelector {
        &self.manager
    }

    pub fn len(&self) -> usize {
        self.specifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specifications.is_empty()
    }

    pub fn specification_names(&self) -> Vec<&'static str> {
        self.specifications.iter().map(|s| s.name()).collect()
    }
}

impl std::fmt::Debug for SpecificationCompound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecificationCompound")
            .field("result_shape", &self.result_shape)
            .field("manager", &self.manager)
            .field("specifications", &self.specification_names())
            .finish()
    }
}

/// Fluent constructor for [`SpecificationCompound`]
///
/// # Example
/// ```text
/// let compound = SpecificationCompound::many_objects(SelectEntity::new("Article", "a"))
///     .where_equal_to("author_id", "author_id", 7)
///     .order_by_asc("title")
///     .paginate(1, 20)?
///     .build();
/// ```
pub struct CompoundBuilder {
    specifications: Vec<Arc<dyn Specification>>,
    result_shape: ResultShape,
    manager: ManagerSelector,
}

impl CompoundBuilder {
    /// Append a specification
    pub fn add_specification(mut self, specification: impl Specification + 'static) -> Self {
        self.specifications.push(Arc::new(specification));
        self
    }

    /// Append an already shared specification
    pub fn add_shared(mut self, specification: Arc<dyn Specification>) -> Self {
        self.specifications.push(specification);
        self
    }

    pub fn where_equal_to(self, field: &str, param: &str, value: impl Into<Value>) -> Self {
        self.add_specification(WhereField::equal_to(field, param, value))
    }

    pub fn where_not_equal_to(self, field: &str, param: &str, value: impl Into<Value>) -> Self {
        self.add_specification(WhereField::not_equal_to(field, param, value))
    }

    pub fn where_less_than(self, field: &str, param: &str, value: impl Into<Value>) -> Self {
        self.add_specification(WhereField::less_than(field, param, value))
    }

    pub fn where_less_than_or_equal(self, field: &str, param: &str, value: impl Into<Value>) -> Self {
        self.add_specification(WhereField::less_than_or_equal(field, param, value))
    }

    pub fn where_greater_than(self, field: &str, param: &str, value: impl Into<Value>) -> Self {
        self.add_specification(WhereField::greater_than(field, param, value))
    }

    pub fn where_greater_than_or_equal(self, field: &str, param: &str, value: impl Into<Value>) -> Self {
        self.add_specification(WhereField::greater_than_or_equal(field, param, value))
    }

    pub fn where_like(self, field: &str, param: &str, pattern: impl Into<Value>) -> Self {
        self.add_specification(WhereField::like(field, param, pattern))
    }

    pub fn where_between(
        self,
        field: &str,
        param: &str,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        self.add_specification(WhereField::between(field, param, from, to))
    }

    pub fn where_in<V: Into<Value>>(
        self,
        field: &str,
        param: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        Ok(self.add_specification(WhereField::is_in(field, param, values)?))
    }

    pub fn where_not_in<V: Into<Value>>(
        self,
        field: &str,
        param: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        Ok(self.add_specification(WhereField::not_in(field, param, values)?))
    }

    pub fn where_null(self, field: &str) -> Self {
        self.add_specification(WhereField::is_null(field))
    }

    pub fn where_not_null(self, field: &str) -> Self {
        self.add_specification(WhereField::is_not_null(field))
    }

    pub fn order_by_asc(self, field: &str) -> Self {
        self.add_specification(OrderBy::asc(field))
    }

    pub fn order_by_desc(self, field: &str) -> Self {
        self.add_specification(OrderBy::desc(field))
    }

    pub fn max_results(self, count: i64) -> Result<Self> {
        Ok(self.add_specification(LimitResultsMaxCount::new(count)?))
    }

    pub fn result_offset(self, offset: i64) -> Result<Self> {
        Ok(self.add_specification(LimitResultsOffset::new(offset)?))
    }

    pub fn paginate(self, page: i64, per_page: i64) -> Result<Self> {
        Ok(self.add_specification(LimitResultsPaginate::new(page, per_page)?))
    }

    /// Ad-hoc builder logic
    pub fn callback(self, callback: impl Fn(&mut dyn QueryBuilder) + Send + Sync + 'static) -> Self {
        self.add_specification(CallbackBuilder::new(callback))
    }

    /// Log the DQL once the query is compiled
    pub fn dump_dql(self) -> Self {
        self.add_specification(DumpDql::new())
    }

    /// Log the SQL once the query is compiled
    pub fn dump_sql(self) -> Self {
        self.add_specification(DumpSql::new())
    }

    /// Run against the manager registered under `name`
    pub fn use_manager(mut self, name: impl Into<String>) -> Self {
        self.manager = ManagerSelector::Named(name.into());
        self
    }

    /// Run against the manager mapping `entity`
    pub fn use_manager_for(mut self, entity: impl Into<String>) -> Self {
        self.manager = ManagerSelector::ForEntity(entity.into());
        self
    }

    /// Freeze into an immutable compound
    pub fn build(self) -> SpecificationCompound {
        SpecificationCompound {
            specifications: self.specifications.into(),
            result_shape: self.result_shape,
            manager: self.manager,
        }
    }
}
