use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Error when serializing the {0} result")]
    SerializeError(String),

    #[error("The ballot of {voter} sums to {sum} and can't be normalized")]
    DegenerateBallot { voter: String, sum: f64 },

    #[error("At least one member ballot is needed to fit other ballots on")]
    NoReferenceBallots {},

    #[error("Ballot vectors should have {expected} entries, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("The best fit program could not be solved : {0}")]
    Solver(String),

    #[error("Voting can't run yet : {0}")]
    NotReadyToRun(String),

    #[error("Amount for {0} is not a finite positive number")]
    NonFiniteAmount(String),
}
