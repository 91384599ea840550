// Field Predicate Specifications

use super::qualify;
use crate::application::Specification;
use crate::domain::{ParamType, Value};
use crate::error::{AppError, Result};
use crate::port::QueryBuilder;

/// Predicate shape applied to one field
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    EqualTo(Value),
    NotEqualTo(Value),
    LessThan(Value),
    LessThanOrEqual(Value),
    GreaterThan(Value),
    GreaterThanOrEqual(Value),
    Like(Value),
    Between(Value, Value),
    In(Vec<Value>),
    NotIn(Vec<Value>),
    IsNull,
    IsNotNull,
}

/// One WHERE fragment on one field, with its bound parameter(s)
///
/// Unqualified field names are prefixed with the builder's root alias.
///
/// # Example
/// ```text
/// WhereField::equal_to("author_id", "author_id", 7)
///   => WHERE a.author_id = :author_id   (author_id = 7)
/// ```
#[derive(Debug, Clone)]
pub struct WhereField {
    field: String,
    param: String,
    predicate: Predicate,
    type_hint: Option<ParamType>,
}

impl WhereField {
    fn new(field: impl Into<String>, param: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            field: field.into(),
            param: param.into().trim_start_matches(':').to_string(),
            predicate,
            type_hint: None,
        }
    }

    pub fn equal_to(field: impl Into<String>, param: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, param, Predicate::EqualTo(value.into()))
    }

    pub fn not_equal_to(field: impl Into<String>, param: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, param, Predicate::NotEqualTo(value.into()))
    }

    pub fn less_than(field: impl Into<String>, param: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, param, Predicate::LessThan(value.into()))
    }

    pub fn less_than_or_equal(field: impl Into<String>, param: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, param, Predicate::LessThanOrEqual(value.into()))
    }

    pub fn greater_than(field: impl Into<String>, param: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, param, Predicate::GreaterThan(value.into()))
    }

    pub fn greater_than_or_equal(field: impl Into<String>, param: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, param, Predicate::GreaterThanOrEqual(value.into()))
    }

    pub fn like(field: impl Into<String>, param: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::new(field, param, Predicate::Like(pattern.into()))
    }

    /// Binds `<param>_from` and `<param>_to`
    pub fn between(
        field: impl Into<String>,
        param: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        Self::new(field, param, Predicate::Between(from.into(), to.into()))
    }

    /// # Errors
    /// `InvalidArgument` when `values` is empty
    pub fn is_in<V: Into<Value>>(
        field: impl Into<String>,
        param: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        let values = non_empty_list(values)?;
        Ok(Self::new(field, param, Predicate::In(values)))
    }

    /// # Errors
    /// `InvalidArgument` when `values` is empty
    pub fn not_in<V: Into<Value>>(
        field: impl Into<String>,
        param: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        let values = non_empty_list(values)?;
        Ok(Self::new(field, param, Predicate::NotIn(values)))
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Self::new(field, "", Predicate::IsNull)
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::new(field, "", Predicate::IsNotNull)
    }

    /// Attach a type hint applied to every bound parameter
    pub fn with_type(mut self, type_hint: ParamType) -> Self {
        self.type_hint = Some(type_hint);
        self
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// WHERE fragment for a (possibly qualified) field name
    pub fn fragment(&self, field: &str) -> String {
        let param = &self.param;
        let operator = match &self.predicate {
            Predicate::EqualTo(_) => "=",
            Predicate::NotEqualTo(_) => "<>",
            Predicate::LessThan(_) => "<",
            Predicate::LessThanOrEqual(_) => "<=",
            Predicate::GreaterThan(_) => ">",
            Predicate::GreaterThanOrEqual(_) => ">=",
            Predicate::Like(_) => "LIKE",
            Predicate::Between(_, _) => {
                return format!("{} BETWEEN :{}_from AND :{}_to", field, param, param)
            }
            Predicate::In(_) => return format!("{} IN (:{})", field, param),
            Predicate::NotIn(_) => return format!("{} NOT IN (:{})", field, param),
            Predicate::IsNull => return format!("{} IS NULL", field),
            Predicate::IsNotNull => return format!("{} IS NOT NULL", field),
        };
        format!("{} {} :{}", field, operator, param)
    }

    /// Parameters bound by this predicate
    pub fn bindings(&self) -> Vec<(String, Value)> {
        match &self.predicate {
            Predicate::EqualTo(v)
            | Predicate::NotEqualTo(v)
            | Predicate::LessThan(v)
            | Predicate::LessThanOrEqual(v)
            | Predicate::GreaterThan(v)
            | Predicate::GreaterThanOrEqual(v)
            | Predicate::Like(v) => vec![(self.param.clone(), v.clone())],
            Predicate::Between(from, to) => vec![
                (format!("{}_from", self.param), from.clone()),
                (format!("{}_to", self.param), to.clone()),
            ],
            Predicate::In(values) | Predicate::NotIn(values) => {
                vec![(self.param.clone(), Value::List(values.clone()))]
            }
            Predicate::IsNull | Predicate::IsNotNull => Vec::new(),
        }
    }
}

fn non_empty_list<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Result<Vec<Value>> {
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        return Err(AppError::InvalidArgument(
            "IN list must contain at least one value".to_string(),
        ));
    }
    Ok(values)
}

impl Specification for WhereField {
    fn modify_builder(&self, builder: &mut dyn QueryBuilder) {
        let field = qualify(&self.field, builder.root_alias());
        builder.add_where(&self.fragment(&field));

        for (name, value) in self.bindings() {
            builder.set_parameter(&name, value, self.type_hint);
        }
    }
}
