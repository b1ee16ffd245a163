use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ExecutorError {
    AlreadyInitialized = 400,
    NotInitialized = 401,
    NoActivePlan = 402,
    UnexpectedLender = 403,
    UnexpectedToken = 404,
    InvalidPlan = 405,
    BeneficiaryMismatch = 406,
    HopMismatch = 407,
    QuoteFailed = 408,
    Overflow = 409,
    AmountMismatch = 410,
}
