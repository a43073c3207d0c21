use std::collections::BTreeMap;

use rewards_export::state::{Payout, Project, ProjectId, RewardsConfig};
use utils::{to_hex_amount, to_wei, Address};

use crate::error::ContractError;

pub const ETH_CSV_HEADER: &str = "token_type,token_address,receiver,amount,id";

/// Splits both budgets between the contributors of the funded projects and the
/// community circle.
///
/// Only projects present in `outcome` are paid. A contributor whose upfront
/// payment already covers their ETH share of a project gets no ETH for it,
/// their governance tokens are always paid.
pub fn get_payouts(
    outcome: &BTreeMap<ProjectId, f64>,
    projects: &[Project],
    community_circle: &BTreeMap<Address, f64>,
    eth_budget: f64,
    mooney_budget: f64,
    config: &RewardsConfig,
) -> Result<Payout, ContractError> {
    if !eth_budget.is_finite() || eth_budget < 0.0 {
        return Err(ContractError::NonFiniteAmount("the ETH budget".to_string()));
    }
    if !mooney_budget.is_finite() || mooney_budget < 0.0 {
        return Err(ContractError::NonFiniteAmount(
            "the governance token budget".to_string(),
        ));
    }

    let mut payout = Payout::default();

    for project in projects {
        let Some(project_percentage) = outcome.get(&project.id).copied() else {
            continue;
        };
        payout
            .project_id_to_eth_payout
            .insert(project.id.clone(), project_percentage / 100.0 * eth_budget);
        payout
            .project_id_to_mooney_payout
            .insert(project.id.clone(), project_percentage / 100.0 * mooney_budget);

        let upfront_payments = project.upfront_payment_map()?;
        for (address, contributor_percentage) in project.contributors()? {
            let marginal = contributor_percentage / 100.0 * (project_percentage / 100.0);
            let entitlement = marginal * eth_budget;

            *payout
                .address_to_mooney_payout
                .entry(address.clone())
                .or_insert(0.0) += marginal * mooney_budget;
            let eth = payout.address_to_eth_payout.entry(address.clone()).or_insert(0.0);

            if matches!(upfront_payments.get(&address), Some(paid) if *paid >= entitlement) {
                continue;
            }
            *eth += entitlement;
        }
    }

    for (address, percentage) in community_circle {
        let marginal = config.community_circle_percentage / 100.0 * (percentage / 100.0);
        *payout
            .address_to_mooney_payout
            .entry(address.clone())
            .or_insert(0.0) += marginal * mooney_budget;
        *payout
            .address_to_eth_payout
            .entry(address.clone())
            .or_insert(0.0) += marginal * eth_budget;
    }

    payout.address_to_payout_proportion = payout
        .address_to_mooney_payout
        .iter()
        .map(|(address, mooney)| {
            let proportion = if mooney_budget == 0.0 {
                0.0
            } else {
                mooney / mooney_budget
            };
            (address.clone(), proportion)
        })
        .collect();

    payout.eth_payout_csv = eth_payout_csv(&payout.address_to_eth_payout);
    payout.mooney_payout_csv = mooney_payout_csv(&payout.address_to_mooney_payout);

    let (addresses, amounts) = mooney_transfer_lists(&payout.address_to_mooney_payout)?;
    payout.mooney_addresses = addresses;
    payout.mooney_amounts = amounts;

    Ok(payout)
}

/// Native transfer list, one row per address receiving ETH.
/// Zero amounts, e.g. contributors already covered by an upfront payment, get no row.
pub fn eth_payout_csv(address_to_eth_payout: &BTreeMap<Address, f64>) -> String {
    std::iter::once(ETH_CSV_HEADER.to_string())
        .chain(
            address_to_eth_payout
                .iter()
                .filter(|(_, eth)| **eth != 0.0)
                .map(|(address, eth)| format!("native,,{},{},", address.to_checksum(), eth)),
        )
        .collect::<Vec<String>>()
        .join("\n")
}

/// `address,amount` rows of the governance token distribution
pub fn mooney_payout_csv(address_to_mooney_payout: &BTreeMap<Address, f64>) -> String {
    address_to_mooney_payout
        .iter()
        .filter(|(_, mooney)| **mooney != 0.0)
        .map(|(address, mooney)| format!("{},{}", address.to_checksum(), mooney))
        .collect::<Vec<String>>()
        .join("\n")
}

/// Comma joined addresses and hex wei amounts, index aligned, for a batch transfer call
pub fn mooney_transfer_lists(
    address_to_mooney_payout: &BTreeMap<Address, f64>,
) -> Result<(String, String), ContractError> {
    let mut addresses = vec![];
    let mut amounts = vec![];
    for (address, mooney) in address_to_mooney_payout {
        if *mooney == 0.0 {
            continue;
        }
        let wei = to_wei(*mooney).map_err(|_| ContractError::NonFiniteAmount(address.to_string()))?;
        addresses.push(address.to_checksum());
        amounts.push(to_hex_amount(wei));
    }
    Ok((addresses.join(","), amounts.join(",")))
}
