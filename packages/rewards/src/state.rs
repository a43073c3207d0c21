use std::collections::BTreeMap;

use cosmwasm_std::{StdError, StdResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utils::{parse_address_map, Address};

pub const NORMALIZATION_ITERATIONS: usize = 20; // Part of the numeric output, never a convergence loop
pub const DEFAULT_BUDGET_SHARE: f64 = 90.0; // Percent of the budget distributed through votes
pub const COMMUNITY_CIRCLE_PERCENTAGE: f64 = 10.0; // Percent of the budget set aside for the community circle
pub const ETH_BUDGET_RATE: f64 = 0.05; // Share of the treasury spent each quarter
pub const MOONEY_INITIAL_BUDGET: f64 = 15_000_000.0;
pub const MOONEY_DECAY_RATE: f64 = 0.95; // Applied once per quarter since Q4 2022
pub const MOONEY_GENESIS_YEAR: i32 = 2023;
pub const APPROVAL_BUDGET_CAP: f64 = 0.75; // Share of the ETH budget that approved projects may ask for
pub const MIN_APPROVED_PROJECTS: usize = 3;

pub type ProjectId = String;

/// Project id -> percentage
pub type Distribution = BTreeMap<ProjectId, f64>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    /// JSON text : contributor address -> percent of the project reward
    #[serde(default)]
    pub reward_distribution: String,
    /// JSON text : contributor address -> ETH already paid out this quarter
    #[serde(default)]
    pub upfront_payments: String,
}

impl Project {
    pub fn new(id: &str, title: &str, reward_distribution: &str) -> Self {
        Project {
            id: id.to_string(),
            title: title.to_string(),
            reward_distribution: reward_distribution.to_string(),
            upfront_payments: String::new(),
        }
    }

    pub fn with_upfront_payments(mut self, upfront_payments: &str) -> Self {
        self.upfront_payments = upfront_payments.to_string();
        self
    }

    pub fn contributors(&self) -> StdResult<BTreeMap<Address, f64>> {
        parse_address_map(
            &self.reward_distribution,
            &format!("reward_distribution of project {}", self.id),
        )
    }

    pub fn upfront_payment_map(&self) -> StdResult<BTreeMap<Address, f64>> {
        parse_address_map(
            &self.upfront_payments,
            &format!("upfront_payments of project {}", self.id),
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct Ballot {
    pub address: Address,
    pub year: i32,
    pub quarter: u32,
    pub distribution: Distribution,
}

impl Ballot {
    pub fn new(address: &str, year: i32, quarter: u32, distribution: Distribution) -> Self {
        Ballot {
            address: Address::new(address),
            year,
            quarter,
            distribution,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Debug, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    Native,
    EthDenominated,
    StakedEth,
    BtcDenominated,
    Governance,
    Other,
}

impl TokenClass {
    pub fn of(symbol: &str) -> Self {
        match symbol.trim().to_uppercase().as_str() {
            "ETH" => TokenClass::Native,
            "WETH" => TokenClass::EthDenominated,
            "STETH" | "WSTETH" => TokenClass::StakedEth,
            "WBTC" | "CBBTC" | "TBTC" => TokenClass::BtcDenominated,
            "MOONEY" | "VMOONEY" => TokenClass::Governance,
            _ => TokenClass::Other,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct TreasuryToken {
    pub symbol: String,
    pub balance: f64,
    pub usd: Option<f64>, // Staked positions are reported without a quote
}

impl TreasuryToken {
    pub fn new(symbol: &str, balance: f64, usd: Option<f64>) -> Self {
        TreasuryToken {
            symbol: symbol.to_string(),
            balance,
            usd,
        }
    }

    pub fn class(&self) -> TokenClass {
        TokenClass::of(&self.symbol)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub struct Budget {
    pub eth_budget: f64,
    pub usd_budget: f64,
    pub mooney_budget: f64,
    pub eth_price: f64, // Implied by the treasury ETH holding
    pub usd_value: f64, // Non governance treasury value
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub struct Payout {
    pub project_id_to_eth_payout: BTreeMap<ProjectId, f64>,
    pub project_id_to_mooney_payout: BTreeMap<ProjectId, f64>,
    pub address_to_eth_payout: BTreeMap<Address, f64>,
    pub address_to_mooney_payout: BTreeMap<Address, f64>,
    pub address_to_payout_proportion: BTreeMap<Address, f64>,
    /// `token_type,token_address,receiver,amount,id` rows for the native transfer tool
    pub eth_payout_csv: String,
    /// `address,amount` rows for the governance token distribution
    pub mooney_payout_csv: String,
    pub mooney_addresses: String,
    pub mooney_amounts: String, // hex encoded wei, same order as mooney_addresses
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct RewardsConfig {
    pub budget_share: f64, // Percent of the budget the vote outcome sums to
    pub community_circle_percentage: f64,
    pub eth_budget_rate: f64,
    pub mooney_initial_budget: f64,
    pub mooney_decay_rate: f64,
    pub approval_budget_cap: f64,
    pub min_approved_projects: usize,
    pub reference_eth_price: Option<f64>, // Falls back to the price implied by the treasury
    pub reference_btc_price: Option<f64>, // Falls back to the reported usd value
}

impl Default for RewardsConfig {
    fn default() -> Self {
        RewardsConfig {
            budget_share: DEFAULT_BUDGET_SHARE,
            community_circle_percentage: COMMUNITY_CIRCLE_PERCENTAGE,
            eth_budget_rate: ETH_BUDGET_RATE,
            mooney_initial_budget: MOONEY_INITIAL_BUDGET,
            mooney_decay_rate: MOONEY_DECAY_RATE,
            approval_budget_cap: APPROVAL_BUDGET_CAP,
            min_approved_projects: MIN_APPROVED_PROJECTS,
            reference_eth_price: None,
            reference_btc_price: None,
        }
    }
}

impl RewardsConfig {
    pub fn validate(&self) -> Result<(), StdError> {
        if !(self.budget_share > 0.0 && self.budget_share <= 100.0) {
            return Err(StdError::generic_err(
                "The budget share should be in (0, 100]",
            ));
        }
        if !(0.0..=100.0).contains(&self.community_circle_percentage) {
            return Err(StdError::generic_err(
                "The community circle percentage should be in [0, 100]",
            ));
        }
        // Vote outcome and community circle share the same budget
        if self.budget_share + self.community_circle_percentage > 100.0 + 1e-9 {
            return Err(StdError::generic_err(
                "The budget share and the community circle can't exceed 100 percent together",
            ));
        }
        if !(0.0..=1.0).contains(&self.eth_budget_rate)
            || !(0.0..=1.0).contains(&self.approval_budget_cap)
        {
            return Err(StdError::generic_err("Rates should be in [0, 1]"));
        }
        if !(self.mooney_decay_rate > 0.0 && self.mooney_decay_rate <= 1.0)
            || !(self.mooney_initial_budget >= 0.0)
        {
            return Err(StdError::generic_err(
                "The governance token schedule should be a non negative budget decaying in (0, 1]",
            ));
        }
        for price in [self.reference_eth_price, self.reference_btc_price]
            .into_iter()
            .flatten()
        {
            if !(price.is_finite() && price > 0.0) {
                return Err(StdError::generic_err(
                    "Reference prices should be strictly positive",
                ));
            }
        }
        Ok(())
    }
}
