//! Iterative application of fixes until the source stops changing.

use std::collections::HashSet;

use ordo_diagnostics::{Applicability, Edit};
use ordo_text_size::Ranged;

use crate::{LintError, LintMessage, Linter};

/// Result of running the fixer over one source text.
#[derive(Debug)]
pub struct FixOutcome {
    /// The corrected text.
    pub fixed: String,
    /// Fixes applied over all passes.
    pub fixes_applied: usize,
    /// Passes that applied at least one fix.
    pub iterations: usize,
    /// False when the iteration cap was hit or a correction loop was detected.
    pub converged: bool,
    /// Diagnostics still present in `fixed`.
    pub remaining: Vec<LintMessage>,
}

impl FixOutcome {
    pub fn changed(&self, original: &str) -> bool {
        self.fixed != original
    }
}

/// Lint and fix `source` repeatedly until no applicable fix is left.
///
/// Each pass accepts fixes in document order, skipping any whose edits
/// overlap an edit already accepted in that pass; skipped fixes are picked up
/// by the next pass on the corrected text.
pub fn fix_source(
    source: &str,
    linter: &Linter,
    applicability: Applicability,
    max_iterations: usize,
) -> Result<FixOutcome, LintError> {
    let mut text = source.to_string();
    let mut seen: HashSet<String> = HashSet::new();
    let mut fixes_applied = 0;
    let mut iterations = 0;

    loop {
        let result = linter.lint(&text)?;

        let mut edits: Vec<Edit> = Vec::new();
        let mut accepted = 0;
        for message in &result.messages {
            let Some(fix) = &message.diagnostic.fix else {
                continue;
            };
            if !fix.applies(applicability) || fix.conflicts_with(&edits) {
                continue;
            }
            edits.extend(fix.edits().iter().cloned());
            accepted += 1;
        }

        if accepted == 0 {
            return Ok(FixOutcome {
                fixed: text,
                fixes_applied,
                iterations,
                converged: true,
                remaining: result.messages,
            });
        }

        if iterations >= max_iterations {
            tracing::warn!(
                max_iterations,
                remaining = result.len(),
                "fix iteration cap reached"
            );
            return Ok(FixOutcome {
                fixed: text,
                fixes_applied,
                iterations,
                converged: false,
                remaining: result.messages,
            });
        }

        edits.sort_by_key(|e| std::cmp::Reverse(e.start()));
        let fixed = apply_edits(&text, &remove_overlapping_edits(edits));
        iterations += 1;
        fixes_applied += accepted;
        tracing::debug!(iteration = iterations, fixes = accepted, "applied fixes");

        if fixed == text {
            return Ok(FixOutcome {
                fixed: text,
                fixes_applied,
                iterations,
                converged: true,
                remaining: result.messages,
            });
        }

        seen.insert(std::mem::replace(&mut text, fixed));
        if seen.contains(&text) {
            tracing::warn!(iteration = iterations, "fix loop detected");
            let remaining = linter.lint(&text)?.messages;
            return Ok(FixOutcome {
                fixed: text,
                fixes_applied,
                iterations,
                converged: false,
                remaining,
            });
        }
    }
}

/// Remove overlapping edits, keeping the first one (highest start position).
pub fn remove_overlapping_edits(edits: Vec<Edit>) -> Vec<Edit> {
    let mut result: Vec<Edit> = Vec::new();

    for edit in edits {
        // Edits are sorted descending by start, so accepted edits start later.
        let overlaps = result.iter().any(|existing| edit.end() > existing.start());

        if !overlaps {
            result.push(edit);
        }
    }

    result
}

/// Apply edits sorted descending by start position.
pub fn apply_edits(source: &str, edits: &[Edit]) -> String {
    let mut result = source.to_string();

    for edit in edits {
        let start = usize::from(edit.start());
        let end = usize::from(edit.end());
        result.replace_range(start..end, edit.content().unwrap_or(""));
    }

    result
}
