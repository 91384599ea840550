// Order Specification

use super::qualify;
use crate::application::Specification;
use crate::domain::Direction;
use crate::port::QueryBuilder;

/// Append one ORDER BY entry
#[derive(Debug, Clone)]
pub struct OrderBy {
    field: String,
    direction: Direction,
}

impl OrderBy {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Desc)
    }
}

impl Specification for OrderBy {
    fn modify_builder(&self, builder: &mut dyn QueryBuilder) {
        let field = qualify(&self.field, builder.root_alias());
        builder.add_order_by(&field, self.direction);
    }
}
