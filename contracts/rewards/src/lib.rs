pub mod approval;
pub mod best_fit;
pub mod budget;
pub mod contract;
mod error;
pub mod execute;
pub mod normalize;
pub mod payout;
pub mod quadratic;
pub mod strip;

pub use crate::error::ContractError;

#[cfg(test)]
mod testing;
