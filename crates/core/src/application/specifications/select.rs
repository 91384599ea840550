// Selection Specifications

use crate::application::Specification;
use crate::application::specifications::qualify;
use crate::port::QueryBuilder;

/// `SELECT <alias> FROM <entity> <alias>`
#[derive(Debug, Clone)]
pub struct SelectEntity {
    entity: String,
    alias: String,
}

impl SelectEntity {
    pub fn new(entity: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            alias: alias.into(),
        }
    }
}

impl Specification for SelectEntity {
    fn modify_builder(&self, builder: &mut dyn QueryBuilder) {
        builder.select(&self.alias);
        builder.from(&self.entity, &self.alias);
    }
}

/// Replace the select list with a scalar expression, e.g. `COUNT(a.id)`
#[derive(Debug, Clone)]
pub struct SelectScalar {
    expression: String,
    counted_field: Option<String>,
}

impl SelectScalar {
    /// Expression used verbatim
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            counted_field: None,
        }
    }

    /// `COUNT(<alias>.<field>)`; an unqualified field gets the root alias
    pub fn count(field: &str) -> Self {
        Self {
            expression: format!("COUNT({})", field),
            counted_field: Some(field.to_string()),
        }
    }
}

impl Specification for SelectScalar {
    fn modify_builder(&self, builder: &mut dyn QueryBuilder) {
        match &self.counted_field {
            Some(field) => {
                let counted = match field.as_str() {
                    "*" => field.clone(),
                    _ => qualify(field, builder.root_alias()),
                };
                let expression = format!("COUNT({})", counted);
                builder.select(&expression);
            }
            None => builder.select(&self.expression),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::FakeQueryBuilder;

    #[test]
    fn test_select_entity_sets_select_and_from() {
        let mut builder = FakeQueryBuilder::default();
        SelectEntity::new("Article", "a").modify_builder(&mut builder);

        assert_eq!(builder.parts().select, vec!["a"]);
        assert_eq!(builder.root_alias(), Some("a"));
        assert_eq!(builder.dql(), "SELECT a FROM Article a");
    }

    #[test]
    fn test_select_scalar_replaces_select() {
        let mut builder = FakeQueryBuilder::default();
        SelectEntity::new("Article", "a").modify_builder(&mut builder);
        SelectScalar::count("a.id").modify_builder(&mut builder);

        assert_eq!(builder.dql(), "SELECT COUNT(a.id) FROM Article a");
    }

    #[test]
    fn test_count_qualifies_bare_field() {
        let mut builder = FakeQueryBuilder::default();
        SelectEntity::new("Article", "a").modify_builder(&mut builder);
        SelectScalar::count("id").modify_builder(&mut builder);
        assert_eq!(builder.dql(), "SELECT COUNT(a.id) FROM Article a");

        let mut builder = FakeQueryBuilder::default();
        SelectScalar::count("*").modify_builder(&mut builder);
        assert_eq!(builder.parts().select, vec!["COUNT(*)"]);
    }
}
