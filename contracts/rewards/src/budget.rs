use rewards_export::state::{
    Budget, RewardsConfig, TokenClass, TreasuryToken, MOONEY_GENESIS_YEAR,
};

/// Quarters elapsed since Q4 2022, 2023 Q1 being the first
pub fn quarters_since_genesis(year: i32, quarter: u32) -> i32 {
    (year - MOONEY_GENESIS_YEAR) * 4 + quarter as i32
}

/// Governance token budget, decaying geometrically every quarter
pub fn mooney_budget(year: i32, quarter: u32, config: &RewardsConfig) -> f64 {
    config.mooney_initial_budget * config.mooney_decay_rate.powi(quarters_since_genesis(year, quarter))
}

/// Budgets of a quarter from a treasury snapshot.
///
/// Every ETH-like holding (native, wrapped, staked) is valued at the reference
/// ETH price, BTC wrappers at the reference BTC price when one is configured,
/// and anything else at its reported usd value. Governance tokens are left out.
/// A treasury without a positive ETH holding gets no budget at all.
pub fn get_budget(
    tokens: &[TreasuryToken],
    year: i32,
    quarter: u32,
    config: &RewardsConfig,
) -> Budget {
    let Some(eth) = tokens
        .iter()
        .find(|token| token.class() == TokenClass::Native && token.balance > 0.0)
    else {
        return Budget::default();
    };
    let implied_eth_price = eth.usd.map(|usd| usd / eth.balance);
    let reference_eth_price = match config.reference_eth_price.or(implied_eth_price) {
        Some(price) if price.is_finite() && price > 0.0 => price,
        _ => return Budget::default(),
    };

    let usd_value: f64 = tokens
        .iter()
        .map(|token| match token.class() {
            TokenClass::Native | TokenClass::EthDenominated | TokenClass::StakedEth => {
                token.balance * reference_eth_price
            }
            TokenClass::BtcDenominated => config
                .reference_btc_price
                .map(|price| token.balance * price)
                .unwrap_or(token.usd.unwrap_or(0.0)),
            TokenClass::Governance => 0.0,
            TokenClass::Other => token.usd.unwrap_or(0.0),
        })
        .sum();

    let eth_budget = usd_value * config.eth_budget_rate / reference_eth_price;
    Budget {
        eth_budget,
        usd_budget: eth_budget * reference_eth_price,
        mooney_budget: mooney_budget(year, quarter, config),
        eth_price: implied_eth_price.unwrap_or(0.0),
        usd_value,
    }
}
