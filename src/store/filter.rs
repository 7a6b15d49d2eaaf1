use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use glob::Pattern;

use super::types::{EvaluationLog, EvaluationRecord};
use crate::scoring::SeverityClass;

/// Criteria for `list`. An unset criterion matches everything.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub since: Option<std::time::Duration>,
    pub conveyor: Option<Pattern>,
    pub min_class: Option<SeverityClass>,
}

impl RecordFilter {
    /// Build a filter from command-line strings: a humantime duration
    /// ("7d", "12h"), a conveyor glob ("line-*") and a class 1-5.
    pub fn parse(
        since: Option<&str>,
        conveyor: Option<&str>,
        min_class: Option<u8>,
    ) -> Result<Self> {
        let since = since
            .map(|s| {
                humantime::parse_duration(s.trim())
                    .with_context(|| format!("Invalid --since duration '{}'", s))
            })
            .transpose()?;
        let conveyor = conveyor
            .map(|s| Pattern::new(s).with_context(|| format!("Invalid --conveyor pattern '{}'", s)))
            .transpose()?;
        let min_class = min_class
            .map(|c| {
                SeverityClass::new(c)
                    .with_context(|| format!("Invalid --min-class {}: must be 1-5", c))
            })
            .transpose()?;

        Ok(Self {
            since,
            conveyor,
            min_class,
        })
    }

    pub fn matches(&self, record: &EvaluationRecord, now: DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            let age = (now - record.created_at).to_std().unwrap_or_default();
            if age > since {
                return false;
            }
        }
        if let Some(ref pattern) = self.conveyor {
            match record.conveyor {
                Some(ref tag) if pattern.matches(tag) => {}
                _ => return false,
            }
        }
        if let Some(min_class) = self.min_class {
            if record.result.severity_class < min_class {
                return false;
            }
        }
        true
    }
}

/// Records matching `filter`, in id order
pub fn filter_records<'a>(
    log: &'a EvaluationLog,
    filter: &RecordFilter,
) -> Vec<&'a EvaluationRecord> {
    let now = Utc::now();
    log.records()
        .iter()
        .filter(|r| filter.matches(r, now))
        .collect()
}
