use std::collections::{BTreeMap, BTreeSet};

use rewards_export::state::{Ballot, Distribution, Project, ProjectId};
use utils::Address;

use crate::error::ContractError;

/// Contributors of each project, keyed by project id
pub fn project_contributors(
    projects: &[Project],
) -> Result<BTreeMap<ProjectId, BTreeSet<Address>>, ContractError> {
    projects
        .iter()
        .map(|project| {
            let contributors = project.contributors()?.into_keys().collect();
            Ok((project.id.clone(), contributors))
        })
        .collect()
}

/// Removes what each voter allocated to projects that pay them.
///
/// A ballot touching one of the voter's own projects loses those entries and its
/// zero entries, and the rest is scaled back to 100.
/// Other ballots are returned untouched : an explicit 0 there is still an opinion,
/// whereas a dropped entry gets imputed during normalization.
///
/// A ballot that only funded the voter's own projects comes back with an empty
/// distribution, leaving every project to be imputed.
pub fn strip_self_votes(
    ballots: &[Ballot],
    projects: &[Project],
) -> Result<Vec<Ballot>, ContractError> {
    let contributors = project_contributors(projects)?;
    ballots
        .iter()
        .map(|ballot| strip_ballot(ballot, &contributors))
        .collect()
}

fn strip_ballot(
    ballot: &Ballot,
    contributors: &BTreeMap<ProjectId, BTreeSet<Address>>,
) -> Result<Ballot, ContractError> {
    let is_own = |project_id: &ProjectId| {
        contributors
            .get(project_id)
            .map(|members| members.contains(&ballot.address))
            .unwrap_or(false)
    };
    if !ballot.distribution.keys().any(is_own) {
        return Ok(ballot.clone());
    }

    let remaining: Distribution = ballot
        .distribution
        .iter()
        .filter(|(project_id, value)| !is_own(*project_id) && **value != 0.0)
        .map(|(project_id, value)| (project_id.clone(), *value))
        .collect();
    if remaining.is_empty() {
        return Ok(Ballot {
            distribution: Distribution::new(),
            ..ballot.clone()
        });
    }
    let total: f64 = remaining.values().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(ContractError::DegenerateBallot {
            voter: ballot.address.to_string(),
            sum: total,
        });
    }

    Ok(Ballot {
        distribution: remaining
            .into_iter()
            .map(|(project_id, value)| (project_id, value / total * 100.0))
            .collect(),
        ..ballot.clone()
    })
}
