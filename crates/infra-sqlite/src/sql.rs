// DQL -> SQLite SQL compilation

use crate::entity_manager::EntityMappings;
use queryspec_core::domain::{QueryParts, Value};
use queryspec_core::error::{AppError, Result};
use std::collections::HashSet;

/// Positional argument bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

/// SQL text plus its positional arguments
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSql {
    pub sql: String,
    pub args: Vec<SqlArg>,
}

/// Compile recorded builder parts into SQLite SQL
///
/// - entity names become table names
/// - selecting a bare alias selects all of its columns (`alias.*`)
/// - `:name` placeholders become `?`, list values expand to `?, ?, ...`
/// - the result window becomes `LIMIT`/`OFFSET`
///
/// # Errors
/// - `NotFound` for an unmapped entity
/// - `Query` for unbound placeholders, unused bindings or empty lists
/// - `InvalidArgument` when a type hint cannot be applied
pub fn compile(
    parts: &QueryParts,
    mappings: &EntityMappings,
    first_result: u64,
    max_results: Option<u64>,
) -> Result<CompiledSql> {
    let root_alias = parts.from.as_ref().map(|f| f.alias.as_str());

    let select: Vec<String> = if parts.select.is_empty() {
        vec![root_alias.map_or_else(|| "*".to_string(), |a| format!("{}.*", a))]
    } else {
        parts
            .select
            .iter()
            .map(|expr| match root_alias {
                Some(alias) if expr == alias => format!("{}.*", alias),
                _ => expr.clone(),
            })
            .collect()
    };

    let mut text = format!("SELECT {}", select.join(", "));

    if let Some(from) = &parts.from {
        let mapping = mappings.get(&from.entity).ok_or_else(|| {
            AppError::NotFound(format!("Entity '{}' is not mapped", from.entity))
        })?;
        text.push_str(&format!(" FROM {} {}", mapping.table, from.alias));
    }

    if !parts.wheres.is_empty() {
        let predicates: Vec<String> = parts.wheres.iter().map(|w| format!("({})", w)).collect();
        text.push_str(" WHERE ");
        text.push_str(&predicates.join(" AND "));
    }

    if !parts.order_by.is_empty() {
        let entries: Vec<String> = parts
            .order_by
            .iter()
            .map(|o| format!("{} {}", o.sort, o.direction))
            .collect();
        text.push_str(" ORDER BY ");
        text.push_str(&entries.join(", "));
    }

    let (mut sql, args) = bind_placeholders(&text, parts)?;

    // SQLite needs a LIMIT before OFFSET; -1 means unbounded
    match (max_results, first_result) {
        (Some(max), 0) => sql.push_str(&format!(" LIMIT {}", max)),
        (Some(max), first) => sql.push_str(&format!(" LIMIT {} OFFSET {}", max, first)),
        (None, 0) => {}
        (None, first) => sql.push_str(&format!(" LIMIT -1 OFFSET {}", first)),
    }

    Ok(CompiledSql { sql, args })
}

/// Replace `:name` placeholders outside quoted spans with positional ones
///
/// Both `'string'` literals and `"identifier"` spans are skipped.
fn bind_placeholders(text: &str, parts: &QueryParts) -> Result<(String, Vec<SqlArg>)> {
    let chars: Vec<char> = text.chars().collect();
    let mut sql = String::with_capacity(text.len());
    let mut args = Vec::new();
    let mut used = HashSet::new();
    let mut quote: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if let Some(open) = quote {
            if c == open {
                quote = None;
            }
        } else if c == '\'' || c == '"' {
            quote = Some(c);
        } else if c == ':'
            && chars
                .get(i + 1)
                .is_some_and(|n| n.is_ascii_alphabetic() || *n == '_')
        {
            let start = i + 1;
            let mut end = start;
            while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_') {
                end += 1;
            }
            let name: String = chars[start..end].iter().collect();

            let param = parts.parameter(&name).ok_or_else(|| {
                AppError::Query(format!("Parameter ':{}' is not bound", name))
            })?;
            let value = match param.type_hint {
                Some(hint) => param.value.clone().coerce(hint)?,
                None => param.value.clone(),
            };

            match value {
                Value::List(items) => {
                    if items.is_empty() {
                        return Err(AppError::Query(format!(
                            "Parameter ':{}' is an empty list",
                            name
                        )));
                    }
                    let placeholders = vec!["?"; items.len()].join(", ");
                    sql.push_str(&placeholders);
                    for item in items {
                        args.push(to_arg(&name, item)?);
                    }
                }
                scalar => {
                    sql.push('?');
                    args.push(to_arg(&name, scalar)?);
                }
            }

            used.insert(name);
            i = end;
            continue;
        }

        sql.push(c);
        i += 1;
    }

    if let Some(unused) = parts.parameters.iter().find(|p| !used.contains(&p.name)) {
        return Err(AppError::Query(format!(
            "Parameter ':{}' is bound but not used",
            unused.name
        )));
    }

    Ok((sql, args))
}

fn to_arg(name: &str, value: Value) -> Result<SqlArg> {
    match value {
        Value::Null => Ok(SqlArg::Null),
        Value::Bool(b) => Ok(SqlArg::Bool(b)),
        Value::Integer(i) => Ok(SqlArg::Integer(i)),
        Value::Real(f) => Ok(SqlArg::Real(f)),
        Value::Text(s) => Ok(SqlArg::Text(s)),
        Value::List(_) => Err(AppError::Query(format!(
            "Parameter ':{}' contains a nested list",
            name
        ))),
    }
}
