// Specification - one reusable query criterion

use crate::port::{Query, QueryBuilder};

/// A unit encoding one query criterion
///
/// Both hooks default to no-ops; implementations override the one(s) they
/// need. `modify_builder` runs before compilation, `modify_query` after.
pub trait Specification: Send + Sync {
    /// Mutate the query builder (WHERE, ORDER BY, SELECT, parameters)
    fn modify_builder(&self, _builder: &mut dyn QueryBuilder) {}

    /// Mutate the compiled query (result window, debug output)
    fn modify_query(&self, _query: &mut dyn Query) {}

    /// Short name used in debug output
    fn name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Strip the module path from a type name
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}

type BuilderCallback = Box<dyn Fn(&mut dyn QueryBuilder) + Send + Sync>;
type QueryCallback = Box<dyn Fn(&mut dyn Query) + Send + Sync>;

/// Escape hatch: run arbitrary logic against the builder
pub struct CallbackBuilder {
    callback: BuilderCallback,
}

impl CallbackBuilder {
    pub fn new(callback: impl Fn(&mut dyn QueryBuilder) + Send + Sync + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl Specification for CallbackBuilder {
    fn modify_builder(&self, builder: &mut dyn QueryBuilder) {
        (self.callback)(builder);
    }
}

/// Escape hatch: run arbitrary logic against the compiled query
pub struct CallbackQuery {
    callback: QueryCallback,
}

impl CallbackQuery {
    pub fn new(callback: impl Fn(&mut dyn Query) + Send + Sync + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl Specification for CallbackQuery {
    fn modify_query(&self, query: &mut dyn Query) {
        (self.callback)(query);
    }
}
