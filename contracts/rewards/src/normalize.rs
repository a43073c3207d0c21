use rewards_export::state::{Ballot, ProjectId, NORMALIZATION_ITERATIONS};

use crate::error::ContractError;

#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedBallots {
    /// One ballot per input ballot, covering every project
    pub ballots: Vec<Ballot>,
    /// Same values as a ballots x projects matrix, in `project_ids` order
    pub votes: Vec<Vec<f64>>,
}

/// Fills the projects a voter skipped with the opinion of their peers.
///
/// Each pass computes the mean of every project column over the votes that were
/// actually cast, builds the full matrix with those means in the gaps, and
/// rescales the cast votes of each ballot by its full row sum.
/// Gaps are never written back, they are recomputed from the new means on the
/// next pass.
///
/// The pass count is fixed, and the summation order (rows for the means,
/// columns for the row sums) is kept stable so published results can be
/// reproduced exactly.
pub fn run_iterative_normalization(
    ballots: &[Ballot],
    project_ids: &[ProjectId],
) -> Result<NormalizedBallots, ContractError> {
    let mut votes: Vec<Vec<Option<f64>>> = ballots
        .iter()
        .map(|ballot| {
            project_ids
                .iter()
                .map(|project_id| ballot.distribution.get(project_id).copied())
                .collect()
        })
        .collect();

    let mut filled: Vec<Vec<f64>> = vec![];
    for _ in 0..NORMALIZATION_ITERATIONS {
        let averages = column_averages(&votes, project_ids.len());

        filled = votes
            .iter()
            .map(|row| {
                row.iter()
                    .zip(averages.iter())
                    .map(|(vote, average)| vote.unwrap_or(*average))
                    .collect()
            })
            .collect();

        for ((row, filled_row), ballot) in votes.iter_mut().zip(filled.iter()).zip(ballots) {
            let sum: f64 = filled_row.iter().sum();
            if !(sum.is_finite() && sum != 0.0) {
                return Err(ContractError::DegenerateBallot {
                    voter: ballot.address.to_string(),
                    sum,
                });
            }
            for vote in row.iter_mut().flatten() {
                *vote = *vote / sum * 100.0;
            }
        }
    }

    let normalized = ballots
        .iter()
        .zip(filled.iter())
        .map(|(ballot, row)| Ballot {
            distribution: project_ids.iter().cloned().zip(row.iter().copied()).collect(),
            ..ballot.clone()
        })
        .collect();

    Ok(NormalizedBallots {
        ballots: normalized,
        votes: filled,
    })
}

/// Mean of the cast votes of each project, 0 for a project nobody voted on
fn column_averages(votes: &[Vec<Option<f64>>], num_projects: usize) -> Vec<f64> {
    (0..num_projects)
        .map(|j| {
            let (sum, count) = votes
                .iter()
                .filter_map(|row| row[j])
                .fold((0.0, 0usize), |(sum, count), vote| (sum + vote, count + 1));
            if count == 0 {
                0.0
            } else {
                sum / count as f64
            }
        })
        .collect()
}
