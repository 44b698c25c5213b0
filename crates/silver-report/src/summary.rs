use std::collections::BTreeMap;

use serde::Serialize;

use silver_model::{ReasonCode, Severity, SourceId, ValidationFinding};

/// Count of findings sharing a source, reason and severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindingCount {
    pub source: SourceId,
    pub reason: ReasonCode,
    pub severity: Severity,
    pub count: usize,
}

/// Findings tallied by source and reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FindingsSummary {
    pub counts: Vec<FindingCount>,
}

impl FindingsSummary {
    /// Tally findings. Sources keep their first-seen order; reasons within a
    /// source are sorted.
    pub fn from_findings(findings: &[ValidationFinding]) -> Self {
        let mut order: Vec<&SourceId> = Vec::new();
        let mut tallies: BTreeMap<(&SourceId, ReasonCode, Severity), usize> = BTreeMap::new();
        for finding in findings {
            if !order.contains(&&finding.source) {
                order.push(&finding.source);
            }
            *tallies
                .entry((&finding.source, finding.reason, finding.severity))
                .or_default() += 1;
        }
        let counts = order
            .into_iter()
            .flat_map(|source| {
                tallies
                    .iter()
                    .filter(move |((tallied, _, _), _)| *tallied == source)
                    .map(|((source, reason, severity), count)| FindingCount {
                        source: (*source).clone(),
                        reason: *reason,
                        severity: *severity,
                        count: *count,
                    })
            })
            .collect();
        Self { counts }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Totals per reason across all sources.
    pub fn by_reason(&self) -> BTreeMap<ReasonCode, usize> {
        let mut totals = BTreeMap::new();
        for count in &self.counts {
            *totals.entry(count.reason).or_default() += count.count;
        }
        totals
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
