// Result Shape & Manager Selection

use serde::{Deserialize, Serialize};

/// How the repository executes a compiled query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultShape {
    /// Ordered sequence of hydrated rows (possibly empty)
    ManyObjects,
    /// Exactly one hydrated row, or none
    SingleObject,
    /// Exactly one scalar value
    SingleScalar,
}

impl std::fmt::Display for ResultShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultShape::ManyObjects => write!(f, "MANY_OBJECTS"),
            ResultShape::SingleObject => write!(f, "SINGLE_OBJECT"),
            ResultShape::SingleScalar => write!(f, "SINGLE_SCALAR"),
        }
    }
}

/// Which entity manager a compound runs against
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ManagerSelector {
    #[default]
    Default,
    /// Manager registered under this name
    Named(String),
    /// Manager that maps this entity
    ForEntity(String),
}

impl std::fmt::Display for ManagerSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManagerSelector::Default => write!(f, "default"),
            ManagerSelector::Named(name) => write!(f, "name:{}", name),
            ManagerSelector::ForEntity(entity) => write!(f, "entity:{}", entity),
        }
    }
}
