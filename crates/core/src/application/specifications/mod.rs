// Built-in Specifications

pub mod dump;
pub mod limit;
pub mod order;
pub mod select;
pub mod where_field;

pub use dump::{DumpDql, DumpSql};
pub use limit::{LimitResultsMaxCount, LimitResultsOffset, LimitResultsPaginate};
pub use order::OrderBy;
pub use select::{SelectEntity, SelectScalar};
pub use where_field::{Predicate, WhereField};

/// Prefix an unqualified field with the root alias
pub(crate) fn qualify(field: &str, root_alias: Option<&str>) -> String {
    match root_alias {
        Some(alias) if !field.contains('.') && !field.contains('(') => {
            format!("{}.{}", alias, field)
        }
        _ => field.to_string(),
    }
}
