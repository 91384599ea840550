// In-memory port fakes for unit tests

use crate::domain::{QueryParts, Row, Value};
use crate::error::{AppError, Result};
use crate::port::{EntityManager, ManagerRegistry, Query, QueryBuilder};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Shared event log written by fakes and probes
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn row(columns: &[(&str, Value)]) -> Row {
    Row::new(
        columns
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect(),
    )
}

/// Builder over a fixed row set; compiling snapshots the parts
#[derive(Default)]
pub struct FakeQueryBuilder {
    parts: QueryParts,
    rows: Arc<Vec<Row>>,
    log: EventLog,
}

impl FakeQueryBuilder {
    pub fn with_rows(rows: Arc<Vec<Row>>, log: EventLog) -> Self {
        Self {
            parts: QueryParts::default(),
            rows,
            log,
        }
    }
}

impl QueryBuilder for FakeQueryBuilder {
    fn parts(&self) -> &QueryParts {
        &self.parts
    }

    fn parts_mut(&mut self) -> &mut QueryParts {
        &mut self.parts
    }

    fn get_query(&self) -> Result<Box<dyn Query>> {
        self.log.lock().unwrap().push("compile".to_string());
        Ok(Box::new(FakeQuery {
            parts: self.parts.clone(),
            rows: Arc::clone(&self.rows),
            max_results: None,
            first_result: 0,
            log: Arc::clone(&self.log),
        }))
    }
}

/// Query returning the fake rows through the result window
pub struct FakeQuery {
    pub parts: QueryParts,
    rows: Arc<Vec<Row>>,
    max_results: Option<u64>,
    first_result: u64,
    log: EventLog,
}

#[async_trait]
impl Query for FakeQuery {
    fn set_max_results(&mut self, max_results: Option<u64>) {
        self.max_results = max_results;
    }

    fn set_first_result(&mut self, first_result: u64) {
        self.first_result = first_result;
    }

    fn max_results(&self) -> Option<u64> {
        self.max_results
    }

    fn first_result(&self) -> u64 {
        self.first_result
    }

    fn dql(&self) -> String {
        self.parts.to_dql()
    }

    fn sql(&self) -> Result<String> {
        Ok(format!("-- fake\n{}", self.parts.to_dql()))
    }

    async fn get_result(&mut self) -> Result<Vec<Row>> {
        self.log.lock().unwrap().push("execute".to_string());
        let take = self.max_results.map(|m| m as usize).unwrap_or(usize::MAX);
        Ok(self
            .rows
            .iter()
            .skip(self.first_result as usize)
            .take(take)
            .cloned()
            .collect())
    }
}

pub struct FakeManager {
    pub name: String,
    pub entities: Vec<String>,
    pub rows: Arc<Vec<Row>>,
    pub log: EventLog,
}

impl FakeManager {
    pub fn new(name: &str, entities: &[&str], rows: Vec<Row>, log: EventLog) -> Self {
        Self {
            name: name.to_string(),
            entities: entities.iter().map(|e| e.to_string()).collect(),
            rows: Arc::new(rows),
            log,
        }
    }
}

impl EntityManager for FakeManager {
    fn name(&self) -> &str {
        &self.name
    }

    fn manages(&self, entity: &str) -> bool {
        self.entities.iter().any(|e| e == entity)
    }

    fn create_query_builder(&self) -> Box<dyn QueryBuilder> {
        self.log
            .lock()
            .unwrap()
            .push(format!("manager:{}", self.name));
        Box::new(FakeQueryBuilder::with_rows(
            Arc::clone(&self.rows),
            Arc::clone(&self.log),
        ))
    }
}

/// Registry over fake managers; the first one is the default
pub struct FakeRegistry {
    pub managers: Vec<Arc<FakeManager>>,
}

impl ManagerRegistry for FakeRegistry {
    fn default_manager_name(&self) -> &str {
        &self.managers[0].name
    }

    fn manager(&self, name: Option<&str>) -> Result<Arc<dyn EntityManager>> {
        let name = name.unwrap_or_else(|| self.default_manager_name());
        self.managers
            .iter()
            .find(|m| m.name == name)
            .map(|m| Arc::clone(m) as Arc<dyn EntityManager>)
            .ok_or_else(|| AppError::NotFound(format!("Entity manager '{}'", name)))
    }

    fn manager_for_entity(&self, entity: &str) -> Result<Arc<dyn EntityManager>> {
        self.managers
            .iter()
            .find(|m| m.manages(entity))
            .map(|m| Arc::clone(m) as Arc<dyn EntityManager>)
            .ok_or_else(|| AppError::NotFound(format!("No entity manager maps '{}'", entity)))
    }
}
