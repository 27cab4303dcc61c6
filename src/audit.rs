//! Matrix Coverage Audit
//!
//! Enumerates the full recipient x category cross-product and flags every
//! combination that resolves to the fallback sentinel. A clean committed
//! data set audits with zero failures. This is a pure static-data check,
//! independent of the generation pipeline.

use serde::{Deserialize, Serialize};

use crate::category::{Category, Recipient};
use crate::manifestations::{get_manifestation, FALLBACK_TITLE};

/// One unmapped combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFailure {
    pub recipient: Recipient,
    pub category: Category,
}

/// Full audit outcome, serializable for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub passed: bool,
    pub total: usize,
    pub mapped: usize,
    pub failures: Vec<AuditFailure>,
}

/// Check every canonical (recipient, category) pair against the matrix.
pub fn run_audit() -> AuditReport {
    let mut failures = Vec::new();
    let mut mapped = 0usize;

    for recipient in Recipient::ALL {
        for category in Category::CANONICAL {
            let m = get_manifestation(recipient, category);
            if m.title == FALLBACK_TITLE {
                tracing::warn!(%recipient, %category, "fallback triggered");
                failures.push(AuditFailure { recipient, category });
            } else {
                mapped += 1;
            }
        }
    }

    AuditReport {
        passed: failures.is_empty(),
        total: Recipient::ALL.len() * Category::CANONICAL.len(),
        mapped,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_matrix_audits_clean() {
        let report = run_audit();
        assert!(report.passed, "failures: {:?}", report.failures);
        assert_eq!(report.total, 90);
        assert_eq!(report.mapped, 90);
    }
}
