use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LedgerError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    PoolNotFound = 4,
    InvalidWeight = 5,
    BelowMinimum = 6,
    InsufficientStake = 7,
    OutOfWindow = 8,
    TransferFailed = 9,
    InvalidAmount = 10,
    WithdrawPaused = 11,
    ClaimPaused = 12,
    NumericOverflow = 13,
}
