// Query Parts - recorded state of a query builder

use super::value::{ParamType, Value};
use serde::{Deserialize, Serialize};

/// Sort direction for ORDER BY entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Asc,
    Desc,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Asc => write!(f, "ASC"),
            Direction::Desc => write!(f, "DESC"),
        }
    }
}

/// `FROM <entity> <alias>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromClause {
    pub entity: String,
    pub alias: String,
}

/// ORDER BY entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEntry {
    pub sort: String,
    pub direction: Direction,
}

/// Named parameter binding
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
    pub type_hint: Option<ParamType>,
}

/// Clause fragments accumulated by a builder, in registration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParts {
    pub select: Vec<String>,
    pub from: Option<FromClause>,
    pub wheres: Vec<String>,
    pub order_by: Vec<OrderEntry>,
    pub parameters: Vec<Parameter>,
}

impl QueryParts {
    /// Look up a bound parameter by name
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Bind a parameter; rebinding a name replaces its value in place
    pub fn bind(&mut self, name: &str, value: Value, type_hint: Option<ParamType>) {
        let name = name.trim_start_matches(':');
        match self.parameters.iter_mut().find(|p| p.name == name) {
            Some(existing) => {
                existing.value = value;
                existing.type_hint = type_hint;
            }
            None => self.parameters.push(Parameter {
                name: name.to_string(),
                value,
                type_hint,
            }),
        }
    }

    /// Render the entity-level query text
    ///
    /// Example: `SELECT a FROM Article a WHERE (a.author_id = :author_id) ORDER BY a.title ASC`
    pub fn to_dql(&self) -> String {
        let mut dql = String::from("SELECT ");

        if self.select.is_empty() {
            // Selecting nothing explicitly means the root alias
            match &self.from {
                Some(from) => dql.push_str(&from.alias),
                None => dql.push('*'),
            }
        } else {
            dql.push_str(&self.select.join(", "));
        }

        if let Some(from) = &self.from {
            dql.push_str(&format!(" FROM {} {}", from.entity, from.alias));
        }

        if !self.wheres.is_empty() {
            let predicates: Vec<String> = self.wheres.iter().map(|w| format!("({})", w)).collect();
            dql.push_str(" WHERE ");
            dql.push_str(&predicates.join(" AND "));
        }

        if !self.order_by.is_empty() {
            let entries: Vec<String> = self
                .order_by
                .iter()
                .map(|o| format!("{} {}", o.sort, o.direction))
                .collect();
            dql.push_str(" ORDER BY ");
            dql.push_str(&entries.join(", "));
        }

        dql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_dql_full() {
        let mut parts = QueryParts {
            select: vec!["a".to_string()],
            from: Some(FromClause {
                entity: "Article".to_string(),
                alias: "a".to_string(),
            }),
            ..Default::default()
        };
        parts.wheres.push("a.author_id = :author_id".to_string());
        parts.wheres.push("a.views > :min_views".to_string());
        parts.order_by.push(OrderEntry {
            sort: "a.title".to_string(),
            direction: Direction::Asc,
        });

        assert_eq!(
            parts.to_dql(),
            "SELECT a FROM Article a WHERE (a.author_id = :author_id) AND (a.views > :min_views) ORDER BY a.title ASC"
        );
    }

    #[test]
    fn test_to_dql_defaults_to_root_alias() {
        let parts = QueryParts {
            from: Some(FromClause {
                entity: "Article".to_string(),
                alias: "a".to_string(),
            }),
            ..Default::default()
        };
        assert_eq!(parts.to_dql(), "SELECT a FROM Article a");
    }

    #[test]
    fn test_bind_replaces_existing() {
        let mut parts = QueryParts::default();
        parts.bind("author_id", Value::Integer(1), None);
        parts.bind(":author_id", Value::Integer(7), Some(ParamType::Integer));

        assert_eq!(parts.parameters.len(), 1);
        let param = parts.parameter("author_id").unwrap();
        assert_eq!(param.value, Value::Integer(7));
        assert_eq!(param.type_hint, Some(ParamType::Integer));
    }
}
