use std::collections::BTreeMap;

use rewards_export::state::{Ballot, ProjectId};
use utils::Address;

/// Power weighted average of every project, rescaled so the outcome sums to `budget_share`.
/// A ballot skipping a project counts as a 0 for it.
///
/// Returns an empty outcome when the voters hold no power at all.
pub fn run_quadratic_voting(
    ballots: &[Ballot],
    voting_power: &BTreeMap<Address, f64>,
    budget_share: f64,
) -> BTreeMap<ProjectId, f64> {
    let power_of = |ballot: &Ballot| voting_power.get(&ballot.address).copied().unwrap_or(0.0);

    let total_power: f64 = ballots.iter().map(power_of).sum();
    if total_power == 0.0 {
        return BTreeMap::new();
    }

    let mut averages: BTreeMap<ProjectId, f64> = BTreeMap::new();
    for ballot in ballots {
        let power = power_of(ballot);
        for (project_id, value) in &ballot.distribution {
            *averages.entry(project_id.clone()).or_insert(0.0) += value * power;
        }
    }
    for average in averages.values_mut() {
        *average /= total_power;
    }

    let total: f64 = averages.values().sum();
    averages
        .into_iter()
        .map(|(project_id, average)| {
            let share = if total == 0.0 {
                0.0
            } else {
                average / total * budget_share
            };
            (project_id, share)
        })
        .collect()
}
