use ndarray::Array2;
use serde::Serialize;

use crate::config::AlignmentConfig;
use crate::evaluation::{EvaluationError, Result};

/// Edit operation assigned to one alignment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditOperation {
    Match,
    Substitution,
    Insertion,
    Deletion,
}

/// One step of a reference/hypothesis alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlignmentStep {
    pub operation: EditOperation,
    /// Absent for insertions.
    pub reference_index: Option<usize>,
    /// Absent for deletions.
    pub hypothesis_index: Option<usize>,
}

impl AlignmentStep {
    fn paired(operation: EditOperation, reference: usize, hypothesis: usize) -> Self {
        Self {
            operation,
            reference_index: Some(reference),
            hypothesis_index: Some(hypothesis),
        }
    }

    fn deletion(reference: usize) -> Self {
        Self {
            operation: EditOperation::Deletion,
            reference_index: Some(reference),
            hypothesis_index: None,
        }
    }

    fn insertion(hypothesis: usize) -> Self {
        Self {
            operation: EditOperation::Insertion,
            reference_index: None,
            hypothesis_index: Some(hypothesis),
        }
    }
}

/// Computes a minimum-cost word alignment between `reference` and `hypothesis`.
///
/// Tokens are compared case-insensitively after trimming. On ties the backtrace
/// prefers the diagonal move, then deletion, then insertion, so the reported
/// alignment is deterministic. Steps are returned in left-to-right order.
pub fn align<R, H>(
    reference: &[R],
    hypothesis: &[H],
    config: &AlignmentConfig,
) -> Result<Vec<AlignmentStep>>
where
    R: AsRef<str>,
    H: AsRef<str>,
{
    let reference: Vec<String> = reference.iter().map(|t| comparable(t.as_ref())).collect();
    let hypothesis: Vec<String> = hypothesis.iter().map(|t| comparable(t.as_ref())).collect();
    ensure_within_budget(reference.len(), hypothesis.len(), config.max_cells)?;
    let costs = cost_table(&reference, &hypothesis);
    Ok(backtrace(&costs, &reference, &hypothesis))
}

fn comparable(token: &str) -> String {
    token.trim().to_lowercase()
}

fn ensure_within_budget(rows: usize, cols: usize, max_cells: usize) -> Result<()> {
    let cells = (rows + 1).checked_mul(cols + 1);
    match cells {
        Some(cells) if cells <= max_cells => Ok(()),
        _ => Err(EvaluationError::precondition(format!(
            "alignment of {rows} reference and {cols} hypothesis tokens exceeds \
             the {max_cells}-cell budget"
        ))),
    }
}

fn cost_table(reference: &[String], hypothesis: &[String]) -> Array2<u32> {
    let rows = reference.len();
    let cols = hypothesis.len();
    let mut costs = Array2::<u32>::zeros((rows + 1, cols + 1));
    for i in 0..=rows {
        costs[[i, 0]] = i as u32;
    }
    for j in 0..=cols {
        costs[[0, j]] = j as u32;
    }
    for i in 1..=rows {
        for j in 1..=cols {
            let diagonal = costs[[i - 1, j - 1]] + substitution_cost(reference, hypothesis, i, j);
            let up = costs[[i - 1, j]] + 1;
            let left = costs[[i, j - 1]] + 1;
            costs[[i, j]] = diagonal.min(up).min(left);
        }
    }
    costs
}

fn substitution_cost(reference: &[String], hypothesis: &[String], i: usize, j: usize) -> u32 {
    u32::from(reference[i - 1] != hypothesis[j - 1])
}

fn backtrace(
    costs: &Array2<u32>,
    reference: &[String],
    hypothesis: &[String],
) -> Vec<AlignmentStep> {
    let mut steps = Vec::with_capacity(reference.len() + hypothesis.len());
    let (mut i, mut j) = (reference.len(), hypothesis.len());
    while i > 0 || j > 0 {
        let current = costs[[i, j]];
        if i > 0 && j > 0 {
            let cost = substitution_cost(reference, hypothesis, i, j);
            if costs[[i - 1, j - 1]] + cost == current {
                let operation = if cost == 0 {
                    EditOperation::Match
                } else {
                    EditOperation::Substitution
                };
                steps.push(AlignmentStep::paired(operation, i - 1, j - 1));
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && costs[[i - 1, j]] + 1 == current {
            steps.push(AlignmentStep::deletion(i - 1));
            i -= 1;
        } else {
            steps.push(AlignmentStep::insertion(j - 1));
            j -= 1;
        }
    }
    steps.reverse();
    steps
}

/// Per-operation totals for an alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditCounts {
    pub matches: usize,
    pub substitutions: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl EditCounts {
    pub fn from_steps(steps: &[AlignmentStep]) -> Self {
        steps.iter().fold(Self::default(), |mut counts, step| {
            match step.operation {
                EditOperation::Match => counts.matches += 1,
                EditOperation::Substitution => counts.substitutions += 1,
                EditOperation::Insertion => counts.insertions += 1,
                EditOperation::Deletion => counts.deletions += 1,
            }
            counts
        })
    }

    pub fn errors(&self) -> usize {
        self.substitutions + self.insertions + self.deletions
    }
}
