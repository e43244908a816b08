use serde::{Deserialize, Serialize};

/// A value column of the ingested table.
///
/// `id` is the 0-based position among the value columns (the date column is
/// excluded). It only identifies the column for selection bookkeeping; the
/// analytics key everything by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    pub id: usize,
    pub name: String,
}

impl Instrument {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A caller-defined set of instruments evaluated together.
///
/// Groups are owned by the caller and passed into the aggregators by
/// reference; the engine never stores them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: Option<String>,
    pub members: Vec<Instrument>,
}

impl Group {
    pub fn new(members: Vec<Instrument>) -> Self {
        Self {
            name: None,
            members,
        }
    }

    pub fn named(name: impl Into<String>, members: Vec<Instrument>) -> Self {
        Self {
            name: Some(name.into()),
            members,
        }
    }

    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Display name, falling back to `Group N` with a 1-based ordinal.
    pub fn display_name(&self, ordinal: usize) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("Group {}", ordinal + 1),
        }
    }
}
