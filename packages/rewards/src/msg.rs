use std::collections::BTreeMap;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdError, StdResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utils::Address;

use crate::state::{
    Ballot, Budget, Payout, Project, ProjectId, RewardsConfig, TreasuryToken,
    APPROVAL_BUDGET_CAP, COMMUNITY_CIRCLE_PERCENTAGE, DEFAULT_BUDGET_SHARE, ETH_BUDGET_RATE,
    MIN_APPROVED_PROJECTS, MOONEY_DECAY_RATE, MOONEY_INITIAL_BUDGET,
};

/// Every field is optional, unspecified values fall back to the DAO defaults
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Default)]
pub struct InstantiateMsg {
    pub budget_share: Option<f64>,
    pub community_circle_percentage: Option<f64>,
    pub eth_budget_rate: Option<f64>,
    pub mooney_initial_budget: Option<f64>,
    pub mooney_decay_rate: Option<f64>,
    pub approval_budget_cap: Option<f64>,
    pub min_approved_projects: Option<usize>,
    pub reference_eth_price: Option<f64>,
    pub reference_btc_price: Option<f64>,
}

impl InstantiateMsg {
    pub fn into_config(self) -> StdResult<RewardsConfig> {
        let config = RewardsConfig {
            budget_share: self.budget_share.unwrap_or(DEFAULT_BUDGET_SHARE),
            community_circle_percentage: self
                .community_circle_percentage
                .unwrap_or(COMMUNITY_CIRCLE_PERCENTAGE),
            eth_budget_rate: self.eth_budget_rate.unwrap_or(ETH_BUDGET_RATE),
            mooney_initial_budget: self.mooney_initial_budget.unwrap_or(MOONEY_INITIAL_BUDGET),
            mooney_decay_rate: self.mooney_decay_rate.unwrap_or(MOONEY_DECAY_RATE),
            approval_budget_cap: self.approval_budget_cap.unwrap_or(APPROVAL_BUDGET_CAP),
            min_approved_projects: self.min_approved_projects.unwrap_or(MIN_APPROVED_PROJECTS),
            reference_eth_price: self.reference_eth_price,
            reference_btc_price: self.reference_btc_price,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Quarter budgets from the treasury snapshot
    ComputeBudget {
        tokens: Vec<TreasuryToken>,
        year: i32,
        quarter: u32,
    },
    /// Self vote stripping, normalization, best fit and quadratic voting
    ComputeOutcome {
        projects: Vec<Project>,
        member_ballots: Vec<Ballot>,
        non_member_ballots: Vec<Ballot>,
        #[serde(deserialize_with = "utils::deserialize_address_map")]
        voting_power: BTreeMap<Address, f64>,
    },
    SelectProjects {
        project_ids: Vec<ProjectId>,
        outcome: BTreeMap<ProjectId, f64>,
        costs: BTreeMap<ProjectId, f64>,
        total_budget: f64,
    },
    ComputePayouts {
        projects: Vec<Project>,
        outcome: BTreeMap<ProjectId, f64>,
        #[serde(deserialize_with = "utils::deserialize_address_map")]
        community_circle: BTreeMap<Address, f64>,
        eth_budget: f64,
        mooney_budget: f64,
    },
    /// Every stage for one (year, quarter)
    RunQuarter(QuarterSnapshot),
}

#[cw_serde]
pub struct QuarterSnapshot {
    pub year: i32,
    pub quarter: u32,
    pub tokens: Vec<TreasuryToken>,
    pub projects: Vec<Project>,
    pub member_ballots: Vec<Ballot>,
    pub non_member_ballots: Vec<Ballot>,
    #[serde(deserialize_with = "utils::deserialize_address_map")]
    pub voting_power: BTreeMap<Address, f64>,
    #[serde(deserialize_with = "utils::deserialize_address_map")]
    pub community_circle: BTreeMap<Address, f64>,
    /// ETH asked by each project. When present, only approved projects get paid
    pub project_costs: Option<BTreeMap<ProjectId, f64>>,
}

impl QuarterSnapshot {
    pub fn validate(&self) -> StdResult<()> {
        if !(1..=4).contains(&self.quarter) {
            return Err(StdError::generic_err(format!(
                "Quarter {} does not exist",
                self.quarter
            )));
        }
        if let Some(ballot) = self
            .member_ballots
            .iter()
            .chain(self.non_member_ballots.iter())
            .find(|ballot| ballot.year != self.year || ballot.quarter != self.quarter)
        {
            return Err(StdError::generic_err(format!(
                "Ballot of {} was cast for {}Q{}, not {}Q{}",
                ballot.address, ballot.year, ballot.quarter, self.year, self.quarter
            )));
        }
        Ok(())
    }
}

#[cw_serde]
pub struct OutcomeResponse {
    pub member_ballots: Vec<Ballot>,
    pub non_member_ballots: Vec<Ballot>,
    pub outcome: BTreeMap<ProjectId, f64>,
    /// Voters with nothing left once their own projects are removed. Member
    /// ballots among them are fully imputed, non-member ones are not fitted
    pub empty_ballots: Vec<Address>,
}

#[cw_serde]
pub struct ApprovalResponse {
    pub approved: BTreeMap<ProjectId, bool>,
}

#[cw_serde]
pub struct QuarterResponse {
    pub year: i32,
    pub quarter: u32,
    pub budget: Budget,
    pub outcome: OutcomeResponse,
    pub approved: Option<BTreeMap<ProjectId, bool>>,
    pub payout: Payout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Distribution;

    #[test]
    fn defaults_are_filled() {
        let config = InstantiateMsg::default().into_config().unwrap();
        assert_eq!(config, RewardsConfig::default());
    }

    #[test]
    fn overrides_are_validated() {
        let msg = InstantiateMsg {
            budget_share: Some(100.0),
            community_circle_percentage: Some(0.0),
            ..Default::default()
        };
        assert_eq!(msg.into_config().unwrap().budget_share, 100.0);

        let msg = InstantiateMsg {
            budget_share: Some(100.0),
            ..Default::default()
        };
        assert!(msg.into_config().is_err());
    }

    #[test]
    fn snapshot_rejects_foreign_ballots() {
        let mut snapshot = QuarterSnapshot {
            year: 2024,
            quarter: 2,
            tokens: vec![],
            projects: vec![],
            member_ballots: vec![Ballot::new("0xa", 2024, 2, Distribution::new())],
            non_member_ballots: vec![],
            voting_power: BTreeMap::new(),
            community_circle: BTreeMap::new(),
            project_costs: None,
        };
        snapshot.validate().unwrap();

        snapshot
            .non_member_ballots
            .push(Ballot::new("0xb", 2024, 1, Distribution::new()));
        assert!(snapshot.validate().is_err());

        snapshot.non_member_ballots.clear();
        snapshot.quarter = 5;
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn snapshot_sums_address_spellings() {
        let json = r#"{
            "year": 2024, "quarter": 2, "tokens": [], "projects": [],
            "member_ballots": [], "non_member_ballots": [],
            "voting_power": {"0xABC": 2, "0xabc": 1, "0xdef": 4},
            "community_circle": {"0xDef": 30, " 0xdef": 20},
            "project_costs": null
        }"#;
        let snapshot: QuarterSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.voting_power.len(), 2);
        assert_eq!(snapshot.voting_power[&Address::new("0xabc")], 3.0);
        assert_eq!(snapshot.voting_power[&Address::new("0xdef")], 4.0);
        assert_eq!(
            snapshot.community_circle,
            BTreeMap::from([(Address::new("0xdef"), 50.0)])
        );

        let msg: ExecuteMsg = serde_json::from_str(
            r#"{"compute_payouts": {"projects": [], "outcome": {}, "community_circle": {"0xA": 1, "0xa": 1}, "eth_budget": 1, "mooney_budget": 1}}"#,
        )
        .unwrap();
        match msg {
            ExecuteMsg::ComputePayouts { community_circle, .. } => {
                assert_eq!(community_circle[&Address::new("0xa")], 2.0)
            }
            _ => panic!("unexpected message"),
        }
    }
}
