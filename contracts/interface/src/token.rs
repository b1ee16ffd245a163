use soroban_sdk::contracterror;

/// Revert reason of a transfer or burn larger than the holder's balance.
pub const TRANSFER_AMOUNT_EXCEEDS_BALANCE: &str = "ERC20: transfer amount exceeds balance";

/// Errors raised by the fungible token contract.
///
/// Lives in the shared crate so callers further up a failed call chain can
/// recognise the token's error codes without linking the token contract.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    AlreadyInitialized = 200,
    NotInitialized = 201,
    Unauthorized = 202,
    TransferAmountExceedsBalance = 203,
    InsufficientAllowance = 204,
    Overflow = 205,
    NegativeAmount = 206,
    InvalidExpiration = 207,
}

impl TokenError {
    /// Human-readable revert reason, worded the way ERC20 tokens word them.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::AlreadyInitialized => "ERC20: already initialized",
            TokenError::NotInitialized => "ERC20: not initialized",
            TokenError::Unauthorized => "ERC20: caller is not the admin",
            TokenError::TransferAmountExceedsBalance => TRANSFER_AMOUNT_EXCEEDS_BALANCE,
            TokenError::InsufficientAllowance => "ERC20: insufficient allowance",
            TokenError::Overflow => "ERC20: arithmetic overflow",
            TokenError::NegativeAmount => "ERC20: negative amount",
            TokenError::InvalidExpiration => "ERC20: expiration ledger in the past",
        }
    }
}
