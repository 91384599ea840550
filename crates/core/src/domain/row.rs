// Row - a hydrated result record

use super::value::Value;
use crate::error::Result;
use serde::de::DeserializeOwned;

/// One result row, columns kept in select order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// First column, used for scalar results
    pub fn first(&self) -> Option<&Value> {
        self.columns.first().map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &(String, Value)> {
        self.columns.iter()
    }

    /// Convert into a JSON object keyed by column name
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .columns
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }

    /// Hydrate the row into a typed record
    pub fn hydrate<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Article {
        id: i64,
        title: String,
        summary: Option<String>,
    }

    #[test]
    fn test_hydrate_typed_record() {
        let row = Row::new(vec![
            ("id".to_string(), Value::Integer(3)),
            ("title".to_string(), Value::from("Borrowing")),
            ("summary".to_string(), Value::Null),
        ]);

        let article: Article = row.hydrate().unwrap();
        assert_eq!(
            article,
            Article {
                id: 3,
                title: "Borrowing".to_string(),
                summary: None,
            }
        );
        assert_eq!(row.first(), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_hydrate_type_mismatch() {
        let row = Row::new(vec![("id".to_string(), Value::from("three"))]);
        let result: Result<Article> = row.hydrate();
        assert!(matches!(
            result,
            Err(crate::error::AppError::Serialization(_))
        ));
    }
}
