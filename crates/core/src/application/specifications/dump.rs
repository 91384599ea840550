// Debug Specifications - emit the compiled query text

use crate::application::Specification;
use crate::port::Query;
use std::sync::Arc;
use tracing::{error, info};

type DumpSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Log the entity-level query text
#[derive(Clone, Default)]
pub struct DumpDql {
    sink: Option<DumpSink>,
}

impl DumpDql {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also hand the text to `sink`
    pub fn with_sink(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            sink: Some(Arc::new(sink)),
        }
    }
}

impl Specification for DumpDql {
    fn modify_query(&self, query: &mut dyn Query) {
        let dql = query.dql();
        info!(dql = %dql, "Query DQL");
        if let Some(sink) = &self.sink {
            sink(&dql);
        }
    }
}

/// Log the driver-level SQL
///
/// Debug output only: when the query cannot be compiled the failure is
/// logged at `error` level and the sink is skipped. Execution then fails
/// with the same error, so the caller still receives it.
#[derive(Clone, Default)]
pub struct DumpSql {
    sink: Option<DumpSink>,
}

impl DumpSql {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also hand the text to `sink`
    pub fn with_sink(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            sink: Some(Arc::new(sink)),
        }
    }
}

impl Specification for DumpSql {
    fn modify_query(&self, query: &mut dyn Query) {
        match query.sql() {
            Ok(sql) => {
                info!(sql = %sql, "Query SQL");
                if let Some(sink) = &self.sink {
                    sink(&sql);
                }
            }
            Err(e) => error!(error = %e, "Query SQL unavailable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::specifications::SelectEntity;
    use crate::application::test_support::FakeQueryBuilder;
    use crate::port::QueryBuilder;
    use std::sync::Mutex;

    #[test]
    fn test_dump_dql_and_sql_reach_sink() {
        let captured = Arc::new(Mutex::new(Vec::new()));

        let mut builder = FakeQueryBuilder::default();
        SelectEntity::new("Article", "a").modify_builder(&mut builder);
        let mut query = builder.get_query().unwrap();

        let sink = Arc::clone(&captured);
        DumpDql::with_sink(move |text| sink.lock().unwrap().push(text.to_string()))
            .modify_query(query.as_mut());
        let sink = Arc::clone(&captured);
        DumpSql::with_sink(move |text| sink.lock().unwrap().push(text.to_string()))
            .modify_query(query.as_mut());

        let captured = captured.lock().unwrap();
        assert_eq!(captured[0], "SELECT a FROM Article a");
        assert_eq!(captured[1], "-- fake\nSELECT a FROM Article a");
    }

    struct UncompilableQuery;

    #[async_trait::async_trait]
    impl Query for UncompilableQuery {
        fn set_max_results(&mut self, _max_results: Option<u64>) {}
        fn set_first_result(&mut self, _first_result: u64) {}
        fn max_results(&self) -> Option<u64> {
            None
        }
        fn first_result(&self) -> u64 {
            0
        }
        fn dql(&self) -> String {
            "SELECT a FROM Article a WHERE (a.id = :id)".to_string()
        }
        fn sql(&self) -> crate::error::Result<String> {
            Err(crate::error::AppError::Query(
                "Parameter ':id' is not bound".to_string(),
            ))
        }
        async fn get_result(&mut self) -> crate::error::Result<Vec<crate::domain::Row>> {
            Err(crate::error::AppError::Query(
                "Parameter ':id' is not bound".to_string(),
            ))
        }
    }

    #[tokio::test]
    async fn test_dump_sql_failure_skips_sink_and_execution_still_fails() {
        let captured = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&captured);
        let mut query = UncompilableQuery;

        DumpSql::with_sink(move |text| sink.lock().unwrap().push(text.to_string()))
            .modify_query(&mut query);

        assert!(captured.lock().unwrap().is_empty());
        assert!(matches!(
            query.get_result().await,
            Err(crate::error::AppError::Query(_))
        ));
    }

    #[test]
    fn test_dump_leaves_window_alone() {
        let mut query = FakeQueryBuilder::default().get_query().unwrap();
        query.set_max_results(Some(4));
        DumpDql::new().modify_query(query.as_mut());
        assert_eq!(query.max_results(), Some(4));
    }
}
