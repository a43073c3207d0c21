use std::cmp::Ordering;
use std::collections::BTreeMap;

use rewards_export::state::{ProjectId, RewardsConfig};

/// Number of projects that may be approved out of `num_projects` : half of them
/// rounded up, never less than the floor.
pub fn max_approved_projects(num_projects: usize, min_approved: usize) -> usize {
    num_projects.div_ceil(2).max(min_approved).min(num_projects)
}

/// Walks the projects from the best outcome down.
///
/// The first `min_approved_projects` are approved whatever they cost. Past them,
/// a project is approved while the cumulated cost stays within
/// `approval_budget_cap * total_budget`, and the walk stops at the first one
/// that would exceed it.
/// Ties keep the order of `project_ids`. Missing outcomes and costs count as 0.
pub fn get_approved_projects(
    project_ids: &[ProjectId],
    outcome: &BTreeMap<ProjectId, f64>,
    costs: &BTreeMap<ProjectId, f64>,
    total_budget: f64,
    config: &RewardsConfig,
) -> BTreeMap<ProjectId, bool> {
    let mut ranked: Vec<(&ProjectId, f64)> = project_ids
        .iter()
        .map(|project_id| (project_id, outcome.get(project_id).copied().unwrap_or(0.0)))
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let floor = config.min_approved_projects.min(project_ids.len());
    let max_approved = max_approved_projects(project_ids.len(), config.min_approved_projects);
    let cap = config.approval_budget_cap * total_budget;

    let mut approved: BTreeMap<ProjectId, bool> = project_ids
        .iter()
        .map(|project_id| (project_id.clone(), false))
        .collect();
    let mut cumulative_cost = 0.0;
    for (rank, (project_id, _)) in ranked.into_iter().enumerate() {
        if rank >= max_approved {
            break;
        }
        cumulative_cost += costs.get(project_id).copied().unwrap_or(0.0);
        if rank >= floor && cumulative_cost > cap {
            break;
        }
        approved.insert(project_id.clone(), true);
    }
    approved
}
