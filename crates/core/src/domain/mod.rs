// Domain Layer - Values, shapes and recorded query state

pub mod query_parts;
pub mod row;
pub mod shape;
pub mod value;

// Re-exports
pub use query_parts::{Direction, FromClause, OrderEntry, Parameter, QueryParts};
pub use row::Row;
pub use shape::{ManagerSelector, ResultShape};
pub use value::{ParamType, Value};
