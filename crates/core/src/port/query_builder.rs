// Query Builder Port (Interface)

use crate::domain::{Direction, FromClause, OrderEntry, ParamType, QueryParts, Value};
use crate::error::Result;
use crate::port::Query;

/// Mutable clause accumulator compiled into an executable [`Query`]
///
/// Adapters only provide storage for [`QueryParts`] and the compile step;
/// clause composition is shared through the provided methods.
pub trait QueryBuilder: Send {
    /// Recorded clause fragments
    fn parts(&self) -> &QueryParts;

    /// Mutable access to the recorded clause fragments
    fn parts_mut(&mut self) -> &mut QueryParts;

    /// Compile the recorded parts into an executable query
    fn get_query(&self) -> Result<Box<dyn Query>>;

    /// Replace the select list
    fn select(&mut self, expression: &str) {
        let parts = self.parts_mut();
        parts.select.clear();
        parts.select.push(expression.to_string());
    }

    /// Append to the select list
    fn add_select(&mut self, expression: &str) {
        self.parts_mut().select.push(expression.to_string());
    }

    fn from(&mut self, entity: &str, alias: &str) {
        self.parts_mut().from = Some(FromClause {
            entity: entity.to_string(),
            alias: alias.to_string(),
        });
    }

    /// Append a WHERE fragment, AND-combined with the previous ones
    fn add_where(&mut self, predicate: &str) {
        self.parts_mut().wheres.push(predicate.to_string());
    }

    fn add_order_by(&mut self, sort: &str, direction: Direction) {
        self.parts_mut().order_by.push(OrderEntry {
            sort: sort.to_string(),
            direction,
        });
    }

    fn set_parameter(&mut self, name: &str, value: Value, type_hint: Option<ParamType>) {
        self.parts_mut().bind(name, value, type_hint);
    }

    /// Alias of the FROM clause, if set
    fn root_alias(&self) -> Option<&str> {
        self.parts().from.as_ref().map(|f| f.alias.as_str())
    }

    /// Entity-level query text of the current state
    fn dql(&self) -> String {
        self.parts().to_dql()
    }
}
