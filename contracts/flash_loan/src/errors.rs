use flashswap_interface::TRANSFER_AMOUNT_EXCEEDS_BALANCE;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FlashLoanError {
    AlreadyInitialized = 500,
    NotInitialized = 501,
    InvalidAmount = 502,
    PoolExists = 503,
    PoolNotFound = 504,
    TooManyPools = 505,
    NoLender = 506,
    NoCycle = 507,
    TransferAmountExceedsBalance = 508,
    LoanReverted = 509,
    Overflow = 510,
}

impl FlashLoanError {
    pub fn reason(&self) -> &'static str {
        match self {
            FlashLoanError::AlreadyInitialized => "FlashLoan: already initialized",
            FlashLoanError::NotInitialized => "FlashLoan: not initialized",
            FlashLoanError::InvalidAmount => "FlashLoan: amount must be positive",
            FlashLoanError::PoolExists => "FlashLoan: pool already registered",
            FlashLoanError::PoolNotFound => "FlashLoan: pool not registered",
            FlashLoanError::TooManyPools => "FlashLoan: pool registry is full",
            FlashLoanError::NoLender => "FlashLoan: no pool can lend this amount",
            FlashLoanError::NoCycle => "FlashLoan: no cyclic path back to the token",
            FlashLoanError::TransferAmountExceedsBalance => TRANSFER_AMOUNT_EXCEEDS_BALANCE,
            FlashLoanError::LoanReverted => "FlashLoan: flash loan reverted",
            FlashLoanError::Overflow => "FlashLoan: arithmetic overflow",
        }
    }
}
