//! Corpus-wide validation pass
//!
//! A pass is a deterministic fold over a lexically sorted list of names:
//!
//! ```text
//! names ──sort──▶ parse ──▶ validate(state) ──▶ build_record
//!                   │            │
//!                   ▼            ▼
//!               Rejection    Rejection (or StrictAbort)
//! ```
//!
//! [`CorpusState`] lives for exactly one pass. Two passes over the same
//! list produce identical reports.

use super::error::{GrammarError, IntegrityViolation, SemanticError, StrictAbort};
use super::grammar;
use super::record::{build_record, CatalogRecord};
use super::validator::validate;
use super::vocab::Vocabulary;
use imgindex_ids::{IdParts, Identifier};
use serde::ser::SerializeStruct;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, error, info, warn};

/// Identifiers and sequences accepted so far in one pass.
#[derive(Debug, Default, Clone)]
pub struct CorpusState {
    identifiers: HashSet<Identifier>,
    sequences: HashMap<(u32, u32), HashSet<u32>>,
}

impl CorpusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_identifier(&self, identifier: Identifier) -> bool {
        self.identifiers.contains(&identifier)
    }

    /// Whether the sequence is taken in the parts' (zone, category) bucket.
    pub fn contains_sequence(&self, parts: IdParts) -> bool {
        self.sequences
            .get(&parts.bucket())
            .is_some_and(|seen| seen.contains(&parts.sequence))
    }

    pub fn record(&mut self, identifier: Identifier, parts: IdParts) {
        self.identifiers.insert(identifier);
        self.sequences
            .entry(parts.bucket())
            .or_default()
            .insert(parts.sequence);
    }

    /// Number of accepted identifiers.
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// One reason a file was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    Grammar(GrammarError),
    Semantic(SemanticError),
}

impl RejectionReason {
    pub fn stage(&self) -> &'static str {
        match self {
            RejectionReason::Grammar(_) => "grammar",
            RejectionReason::Semantic(_) => "semantic",
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RejectionReason::Grammar(e) => e.kind(),
            RejectionReason::Semantic(e) => e.kind(),
        }
    }

    /// Reason text without the filename.
    pub fn message(&self) -> String {
        match self {
            RejectionReason::Grammar(e) => e.reason.to_string(),
            RejectionReason::Semantic(e) => e.to_string(),
        }
    }
}

impl Serialize for RejectionReason {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("RejectionReason", 3)?;
        state.serialize_field("stage", self.stage())?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

/// A rejected file with every reason found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub filename: String,
    pub reasons: Vec<RejectionReason>,
}

impl Rejection {
    pub fn is_grammar(&self) -> bool {
        self.reasons
            .iter()
            .any(|r| matches!(r, RejectionReason::Grammar(_)))
    }
}

/// Total and valid counts for one zone or category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: usize,
    pub valid: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Parseable files only, keyed by zone label.
    pub by_zone: BTreeMap<String, Tally>,
    /// Parseable files only, keyed by category label.
    pub by_category: BTreeMap<String, Tally>,
}

impl CorpusSummary {
    fn tally(&mut self, zone: String, category: String, valid: bool) {
        let zone = self.by_zone.entry(zone).or_default();
        zone.total += 1;
        let category = self.by_category.entry(category).or_default();
        category.total += 1;
        if valid {
            zone.valid += 1;
            category.valid += 1;
        }
    }
}

/// Result of a complete pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusReport {
    pub records: Vec<CatalogRecord>,
    pub rejections: Vec<Rejection>,
    pub summary: CorpusSummary,
    /// Cross-record checks of the finished pass; empty on a sound pass.
    pub violations: Vec<IntegrityViolation>,
}

impl CorpusReport {
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty() && self.violations.is_empty()
    }

    /// Re-check cross-record properties: `stated_count` matches the
    /// number of records and no identifier appears twice.
    pub fn verify_integrity(&self, stated_count: usize) -> Vec<IntegrityViolation> {
        let mut violations = Vec::new();
        if stated_count != self.records.len() {
            violations.push(IntegrityViolation::CountMismatch {
                stated: stated_count,
                actual: self.records.len(),
            });
        }
        violations.extend(duplicate_identifiers(
            self.records.iter().map(|r| r.identifier.as_str()),
        ));
        violations
    }
}

/// Identifiers occurring more than once, in first-seen order.
pub(crate) fn duplicate_identifiers<'a>(
    ids: impl Iterator<Item = &'a str>,
) -> Vec<IntegrityViolation> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut order = Vec::new();
    for id in ids {
        let count = counts.entry(id).or_insert(0);
        if *count == 0 {
            order.push(id);
        }
        *count += 1;
    }
    order
        .into_iter()
        .filter_map(|id| {
            let occurrences = counts[id];
            (occurrences > 1).then(|| IntegrityViolation::DuplicateIdentifier {
                id: id.to_string(),
                occurrences,
            })
        })
        .collect()
}

/// Runs the grammar and validator over a whole listing.
pub struct CorpusChecker<'a> {
    vocab: &'a Vocabulary,
    strict: bool,
}

impl<'a> CorpusChecker<'a> {
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Self {
            vocab,
            strict: false,
        }
    }

    /// Abort on the first semantic failure instead of collecting.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate every name with a fresh [`CorpusState`].
    ///
    /// Grammar failures are collected even in strict mode.
    pub fn run<I, S>(&self, filenames: I) -> Result<CorpusReport, StrictAbort>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = filenames.into_iter().map(Into::into).collect();
        names.sort();

        info!(files = names.len(), strict = self.strict, "Starting corpus pass");

        let mut state = CorpusState::new();
        let mut report = CorpusReport::default();

        for name in names {
            report.summary.total += 1;

            let parsed = match grammar::parse(&name) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!("Rejected {}: {}", name, err.reason);
                    report.summary.rejected += 1;
                    report.rejections.push(Rejection {
                        filename: name,
                        reasons: vec![RejectionReason::Grammar(err)],
                    });
                    continue;
                }
            };

            let result = validate(&parsed, self.vocab, Some(&mut state));
            let parts = result.parts();
            report.summary.tally(
                self.vocab.zone_display(parts.zone),
                self.vocab.category_display(parts.category),
                result.is_valid(),
            );

            if result.is_valid() {
                debug!("Accepted {} ({})", name, parts);
                report.summary.accepted += 1;
                report.records.push(build_record(&parsed, self.vocab));
                continue;
            }

            if self.strict {
                if let Some(first) = result.first_error() {
                    error!("Strict mode abort on {}: {}", name, first);
                    return Err(StrictAbort {
                        filename: name,
                        error: first.clone(),
                    });
                }
            }

            for err in result.errors() {
                warn!("Rejected {}: {}", name, err);
            }
            report.summary.rejected += 1;
            report.rejections.push(Rejection {
                filename: name,
                reasons: result
                    .into_errors()
                    .into_iter()
                    .map(RejectionReason::Semantic)
                    .collect(),
            });
        }

        report.violations = report.verify_integrity(report.summary.accepted);
        for violation in &report.violations {
            error!("Integrity violation: {}", violation);
        }

        info!(
            total = report.summary.total,
            accepted = report.summary.accepted,
            rejected = report.summary.rejected,
            "Corpus pass complete"
        );

        Ok(report)
    }
}
