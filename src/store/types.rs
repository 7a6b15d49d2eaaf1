use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{CheckedInput, EnteredMeasurements, EvaluationInput, EvaluationResult};

pub const LOG_VERSION: u32 = 1;

/// A stored evaluation. The result is computed once when the record is
/// created and is never recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub conveyor: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub entered: EnteredMeasurements,
    pub input: EvaluationInput,
    pub result: EvaluationResult,
}

impl EvaluationRecord {
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.created_at
    }

    /// Conveyor tag for display, "-" when untagged
    pub fn conveyor_label(&self) -> &str {
        self.conveyor.as_deref().unwrap_or("-")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationLog {
    pub version: u32,
    #[serde(default = "first_id")]
    pub next_id: u64,
    #[serde(default)]
    pub records: Vec<EvaluationRecord>,
}

fn first_id() -> u64 {
    1
}

impl Default for EvaluationLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationLog {
    /// Create a new empty log with the current version
    pub fn new() -> Self {
        Self {
            version: LOG_VERSION,
            next_id: first_id(),
            records: Vec::new(),
        }
    }

    /// Append an evaluation and return its id. Ids are never reused, even
    /// after removal.
    pub fn append(
        &mut self,
        conveyor: Option<String>,
        notes: Option<String>,
        checked: &CheckedInput,
        result: EvaluationResult,
    ) -> u64 {
        self.append_at(conveyor, notes, checked, result, Utc::now())
    }

    pub fn append_at(
        &mut self,
        conveyor: Option<String>,
        notes: Option<String>,
        checked: &CheckedInput,
        result: EvaluationResult,
        created_at: DateTime<Utc>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.records.push(EvaluationRecord {
            id,
            created_at,
            conveyor,
            notes,
            entered: checked.entered,
            input: checked.input,
            result,
        });
        id
    }

    pub fn get(&self, id: u64) -> Option<&EvaluationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Remove a record.
    /// Returns true if the record existed, false otherwise
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    /// All records in id order
    pub fn records(&self) -> &[EvaluationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
