use std::collections::BTreeMap;

use cosmwasm_std::{Binary, Event, Response};
use serde::Serialize;

use rewards_export::msg::{ApprovalResponse, OutcomeResponse, QuarterResponse, QuarterSnapshot};
use rewards_export::state::{Ballot, Budget, Payout, Project, ProjectId, RewardsConfig, TreasuryToken};
use utils::Address;

use crate::approval::get_approved_projects;
use crate::best_fit::get_best_fit_ballots;
use crate::budget::{get_budget, quarters_since_genesis};
use crate::error::ContractError;
use crate::normalize::run_iterative_normalization;
use crate::payout::get_payouts;
use crate::quadratic::run_quadratic_voting;
use crate::strip::strip_self_votes;

pub fn to_data<T: Serialize>(result: &T, name: &str) -> Result<Binary, ContractError> {
    serde_json::to_vec(result)
        .map(Binary::from)
        .map_err(|_| ContractError::SerializeError(name.to_string()))
}

/// Member ballots are normalized against each other, the other ballots are
/// replaced by their closest mix of member ballots, and everything is
/// aggregated by voting power.
///
/// A member ballot emptied by self vote stripping is filled from its peers.
/// An emptied non-member ballot has nothing to fit and is left out.
pub fn compute_reward_percentages(
    projects: &[Project],
    member_ballots: &[Ballot],
    non_member_ballots: &[Ballot],
    voting_power: &BTreeMap<Address, f64>,
    config: &RewardsConfig,
) -> Result<OutcomeResponse, ContractError> {
    let project_ids: Vec<ProjectId> = projects.iter().map(|project| project.id.clone()).collect();

    let member_ballots = strip_self_votes(member_ballots, projects)?;
    let non_member_ballots = strip_self_votes(non_member_ballots, projects)?;
    let empty_ballots: Vec<Address> = member_ballots
        .iter()
        .chain(non_member_ballots.iter())
        .filter(|ballot| ballot.distribution.is_empty())
        .map(|ballot| ballot.address.clone())
        .collect();
    let non_member_ballots: Vec<Ballot> = non_member_ballots
        .into_iter()
        .filter(|ballot| !ballot.distribution.is_empty())
        .collect();

    let normalized = run_iterative_normalization(&member_ballots, &project_ids)?;
    let fitted = if non_member_ballots.is_empty() {
        vec![]
    } else {
        get_best_fit_ballots(&non_member_ballots, &project_ids, &normalized.votes)?
    };

    let all_ballots: Vec<Ballot> = normalized
        .ballots
        .iter()
        .chain(fitted.iter())
        .cloned()
        .collect();
    let outcome = run_quadratic_voting(&all_ballots, voting_power, config.budget_share);

    Ok(OutcomeResponse {
        member_ballots: normalized.ballots,
        non_member_ballots: fitted,
        outcome,
        empty_ballots,
    })
}

/// A quarter can only be settled once every project got a member vote and a
/// reward split, and the community circle is known
pub fn assert_ready_to_run(
    projects: &[Project],
    member_ballots: &[Ballot],
    community_circle: &BTreeMap<Address, f64>,
) -> Result<(), ContractError> {
    for project in projects {
        if !member_ballots
            .iter()
            .any(|ballot| ballot.distribution.contains_key(&project.id))
        {
            return Err(ContractError::NotReadyToRun(format!(
                "project {} has no member vote",
                project.id
            )));
        }
        if project.contributors()?.is_empty() {
            return Err(ContractError::NotReadyToRun(format!(
                "project {} has no reward distribution",
                project.id
            )));
        }
    }
    if community_circle.is_empty() {
        return Err(ContractError::NotReadyToRun(
            "the community circle is empty".to_string(),
        ));
    }
    Ok(())
}

fn budget_event(budget: &Budget, year: i32, quarter: u32) -> Event {
    Event::new("budget")
        .add_attribute("quarters_since_genesis", quarters_since_genesis(year, quarter).to_string())
        .add_attribute("eth_budget", budget.eth_budget.to_string())
        .add_attribute("usd_budget", budget.usd_budget.to_string())
        .add_attribute("mooney_budget", budget.mooney_budget.to_string())
        .add_attribute("eth_price", budget.eth_price.to_string())
}

fn outcome_events(outcome: &OutcomeResponse, voting_power: &BTreeMap<Address, f64>) -> Vec<Event> {
    vec![
        Event::new("normalization")
            .add_attribute("ballots", outcome.member_ballots.len().to_string())
            .add_attribute("empty_ballots", outcome.empty_ballots.len().to_string()),
        Event::new("best_fit").add_attribute("ballots", outcome.non_member_ballots.len().to_string()),
        Event::new("quadratic_voting")
            .add_attribute("voters", voting_power.len().to_string())
            .add_attribute("projects", outcome.outcome.len().to_string()),
    ]
}

fn approval_event(approved: &BTreeMap<ProjectId, bool>) -> Event {
    let approved_ids: Vec<&str> = approved
        .iter()
        .filter(|(_, approved)| **approved)
        .map(|(project_id, _)| project_id.as_str())
        .collect();
    Event::new("approval")
        .add_attribute("projects", approved.len().to_string())
        .add_attribute("approved", approved_ids.join(","))
}

fn payouts_event(payout: &Payout) -> Event {
    Event::new("payouts")
        .add_attribute("projects", payout.project_id_to_eth_payout.len().to_string())
        .add_attribute("payees", payout.address_to_mooney_payout.len().to_string())
}

pub fn execute_compute_budget(
    config: &RewardsConfig,
    tokens: Vec<TreasuryToken>,
    year: i32,
    quarter: u32,
) -> Result<Response, ContractError> {
    let budget = get_budget(&tokens, year, quarter, config);

    Ok(Response::new()
        .add_event(budget_event(&budget, year, quarter))
        .add_attribute("action", "compute_budget")
        .add_attribute("year", year.to_string())
        .add_attribute("quarter", quarter.to_string())
        .set_data(to_data(&budget, "budget")?))
}

pub fn execute_compute_outcome(
    config: &RewardsConfig,
    projects: Vec<Project>,
    member_ballots: Vec<Ballot>,
    non_member_ballots: Vec<Ballot>,
    voting_power: BTreeMap<Address, f64>,
) -> Result<Response, ContractError> {
    let outcome = compute_reward_percentages(
        &projects,
        &member_ballots,
        &non_member_ballots,
        &voting_power,
        config,
    )?;

    Ok(Response::new()
        .add_events(outcome_events(&outcome, &voting_power))
        .add_attribute("action", "compute_outcome")
        .add_attribute("member_ballots", member_ballots.len().to_string())
        .add_attribute("non_member_ballots", non_member_ballots.len().to_string())
        .set_data(to_data(&outcome, "outcome")?))
}

pub fn execute_select_projects(
    config: &RewardsConfig,
    project_ids: Vec<ProjectId>,
    outcome: BTreeMap<ProjectId, f64>,
    costs: BTreeMap<ProjectId, f64>,
    total_budget: f64,
) -> Result<Response, ContractError> {
    let approved = get_approved_projects(&project_ids, &outcome, &costs, total_budget, config);

    Ok(Response::new()
        .add_event(approval_event(&approved))
        .add_attribute("action", "select_projects")
        .add_attribute("total_budget", total_budget.to_string())
        .set_data(to_data(&ApprovalResponse { approved }, "approval")?))
}

pub fn execute_compute_payouts(
    config: &RewardsConfig,
    projects: Vec<Project>,
    outcome: BTreeMap<ProjectId, f64>,
    community_circle: BTreeMap<Address, f64>,
    eth_budget: f64,
    mooney_budget: f64,
) -> Result<Response, ContractError> {
    let payout = get_payouts(
        &outcome,
        &projects,
        &community_circle,
        eth_budget,
        mooney_budget,
        config,
    )?;

    Ok(Response::new()
        .add_event(payouts_event(&payout))
        .add_attribute("action", "compute_payouts")
        .add_attribute("eth_budget", eth_budget.to_string())
        .add_attribute("mooney_budget", mooney_budget.to_string())
        .set_data(to_data(&payout, "payout")?))
}

/// Budget, vote outcome, project approval and payouts of a whole quarter.
/// Without project costs, every project of the outcome gets paid.
pub fn execute_run_quarter(
    config: &RewardsConfig,
    snapshot: QuarterSnapshot,
) -> Result<Response, ContractError> {
    snapshot.validate()?;
    assert_ready_to_run(
        &snapshot.projects,
        &snapshot.member_ballots,
        &snapshot.community_circle,
    )?;

    let budget = get_budget(&snapshot.tokens, snapshot.year, snapshot.quarter, config);
    let outcome = compute_reward_percentages(
        &snapshot.projects,
        &snapshot.member_ballots,
        &snapshot.non_member_ballots,
        &snapshot.voting_power,
        config,
    )?;

    let project_ids: Vec<ProjectId> = snapshot
        .projects
        .iter()
        .map(|project| project.id.clone())
        .collect();
    let approved = snapshot.project_costs.as_ref().map(|costs| {
        get_approved_projects(&project_ids, &outcome.outcome, costs, budget.eth_budget, config)
    });

    let funded: BTreeMap<ProjectId, f64> = outcome
        .outcome
        .iter()
        .filter(|(project_id, _)| {
            approved
                .as_ref()
                .map(|approved| approved.get(*project_id).copied().unwrap_or(false))
                .unwrap_or(true)
        })
        .map(|(project_id, percentage)| (project_id.clone(), *percentage))
        .collect();

    let payout = get_payouts(
        &funded,
        &snapshot.projects,
        &snapshot.community_circle,
        budget.eth_budget,
        budget.mooney_budget,
        config,
    )?;

    let mut events = vec![budget_event(&budget, snapshot.year, snapshot.quarter)];
    events.extend(outcome_events(&outcome, &snapshot.voting_power));
    if let Some(approved) = &approved {
        events.push(approval_event(approved));
    }
    events.push(payouts_event(&payout));

    let response = QuarterResponse {
        year: snapshot.year,
        quarter: snapshot.quarter,
        budget,
        outcome,
        approved,
        payout,
    };

    Ok(Response::new()
        .add_events(events)
        .add_attribute("action", "run_quarter")
        .add_attribute("year", snapshot.year.to_string())
        .add_attribute("quarter", snapshot.quarter.to_string())
        .add_attribute("projects", snapshot.projects.len().to_string())
        .add_attribute("funded_projects", funded.len().to_string())
        .set_data(to_data(&response, "quarter")?))
}
