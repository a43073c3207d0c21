use minilp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem, Variable};
use rewards_export::state::{Ballot, ProjectId};

use crate::error::ContractError;

/// Weights `c` of the convex combination of `votes` rows closest to `desired` in L1.
///
/// Linear program over `c_i` (one per ballot) and `z_k` (one per project) :
///
/// minimize    sum_k z_k
/// subject to  sum_i c_i = 1
///             sum_i c_i * V[i][k] - z_k <= D[k]
///            -sum_i c_i * V[i][k] - z_k <= -D[k]
///             c_i >= 0, z_k >= 0
///
/// so at the optimum `z_k = |sum_i c_i * V[i][k] - D[k]|`.
pub fn best_fit_coefficients(desired: &[f64], votes: &[Vec<f64>]) -> Result<Vec<f64>, ContractError> {
    if votes.is_empty() {
        return Err(ContractError::NoReferenceBallots {});
    }
    let num_projects = desired.len();
    if let Some(row) = votes.iter().find(|row| row.len() != num_projects) {
        return Err(ContractError::DimensionMismatch {
            expected: num_projects,
            got: row.len(),
        });
    }

    let mut problem = Problem::new(OptimizationDirection::Minimize);
    let weights: Vec<Variable> = votes
        .iter()
        .map(|_| problem.add_var(0.0, (0.0, f64::INFINITY)))
        .collect();
    let deviations: Vec<Variable> = (0..num_projects)
        .map(|_| problem.add_var(1.0, (0.0, f64::INFINITY)))
        .collect();

    let mut total = LinearExpr::empty();
    for weight in &weights {
        total.add(*weight, 1.0);
    }
    problem.add_constraint(total, ComparisonOp::Eq, 1.0);

    for (k, deviation) in deviations.iter().enumerate() {
        let mut above = LinearExpr::empty();
        let mut below = LinearExpr::empty();
        for (weight, row) in weights.iter().zip(votes) {
            above.add(*weight, row[k]);
            below.add(*weight, -row[k]);
        }
        above.add(*deviation, -1.0);
        below.add(*deviation, -1.0);
        problem.add_constraint(above, ComparisonOp::Le, desired[k]);
        problem.add_constraint(below, ComparisonOp::Le, -desired[k]);
    }

    let solution = problem
        .solve()
        .map_err(|err| ContractError::Solver(format!("{err:?}")))?;

    // The simplex can leave tiny negative values and a sum a few ulps away from 1
    let raw: Vec<f64> = weights.iter().map(|weight| solution[*weight].max(0.0)).collect();
    let sum: f64 = raw.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return Err(ContractError::Solver(format!(
            "convex weights sum to {sum}"
        )));
    }
    Ok(raw.into_iter().map(|c| c / sum).collect())
}

/// The convex combination of `votes` rows closest to `desired`
pub fn minimize_l1_distance(desired: &[f64], votes: &[Vec<f64>]) -> Result<Vec<f64>, ContractError> {
    let coefficients = best_fit_coefficients(desired, votes)?;
    Ok((0..desired.len())
        .map(|k| {
            coefficients
                .iter()
                .zip(votes)
                .map(|(c, row)| c * row[k])
                .sum()
        })
        .collect())
}

/// Replaces each ballot by the closest mix of the normalized member votes.
/// Projects missing from a ballot count as a desired 0.
pub fn get_best_fit_ballots(
    ballots: &[Ballot],
    project_ids: &[ProjectId],
    votes: &[Vec<f64>],
) -> Result<Vec<Ballot>, ContractError> {
    ballots
        .iter()
        .map(|ballot| {
            let desired: Vec<f64> = project_ids
                .iter()
                .map(|project_id| ballot.distribution.get(project_id).copied().unwrap_or(0.0))
                .collect();
            let fitted = minimize_l1_distance(&desired, votes)?;
            Ok(Ballot {
                distribution: project_ids.iter().cloned().zip(fitted).collect(),
                ..ballot.clone()
            })
        })
        .collect()
}
