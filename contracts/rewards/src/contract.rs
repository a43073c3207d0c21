use cosmwasm_std::Response;
use serde::de::DeserializeOwned;

use rewards_export::msg::{ExecuteMsg, InstantiateMsg};
use rewards_export::state::RewardsConfig;

use crate::error::ContractError;
use crate::execute::{
    execute_compute_budget, execute_compute_outcome, execute_compute_payouts,
    execute_run_quarter, execute_select_projects,
};

pub const CONTRACT_NAME: &str = "moondao:retroactive-rewards";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn instantiate(msg: InstantiateMsg) -> Result<(RewardsConfig, Response), ContractError> {
    let config = msg.into_config()?;
    let response = Response::default()
        .add_attribute("action", "init")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("version", CONTRACT_VERSION)
        .add_attribute("budget_share", config.budget_share.to_string())
        .add_attribute(
            "community_circle_percentage",
            config.community_circle_percentage.to_string(),
        );
    Ok((config, response))
}

pub fn execute(config: &RewardsConfig, msg: ExecuteMsg) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::ComputeBudget {
            tokens,
            year,
            quarter,
        } => execute_compute_budget(config, tokens, year, quarter),
        ExecuteMsg::ComputeOutcome {
            projects,
            member_ballots,
            non_member_ballots,
            voting_power,
        } => execute_compute_outcome(
            config,
            projects,
            member_ballots,
            non_member_ballots,
            voting_power,
        ),
        ExecuteMsg::SelectProjects {
            project_ids,
            outcome,
            costs,
            total_budget,
        } => execute_select_projects(config, project_ids, outcome, costs, total_budget),
        ExecuteMsg::ComputePayouts {
            projects,
            outcome,
            community_circle,
            eth_budget,
            mooney_budget,
        } => execute_compute_payouts(
            config,
            projects,
            outcome,
            community_circle,
            eth_budget,
            mooney_budget,
        ),
        ExecuteMsg::RunQuarter(snapshot) => execute_run_quarter(config, snapshot),
    }
}

/// Decodes the result carried in the data of an `execute` response
pub fn parse_response_data<T: DeserializeOwned>(response: &Response) -> Result<T, ContractError> {
    let data = response
        .data
        .as_ref()
        .ok_or_else(|| ContractError::SerializeError("missing response data".to_string()))?;
    serde_json::from_slice(data.as_slice())
        .map_err(|err| ContractError::SerializeError(err.to_string()))
}
