// ============================================================
// Registry errors
// ============================================================

/// Failures reported by `PledgeRegistryMapper`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RegistryError {
    /// A balance or the total would exceed 256 bits. Nothing was written.
    Overflow,
    /// The pledger list and the stored amounts disagree. Not reachable
    /// through `add`/`remove`; seeing it means storage was corrupted.
    ConsistencyViolation,
}

impl RegistryError {
    pub const fn message(&self) -> &'static str {
        match self {
            RegistryError::Overflow => ERR_AMOUNT_OVERFLOW,
            RegistryError::ConsistencyViolation => ERR_CONSISTENCY_VIOLATION,
        }
    }
}

// ============================================================
// Contract error messages
// ============================================================

pub const ERR_AMOUNT_OVERFLOW: &str = "Pledge amount overflow";
pub const ERR_CONSISTENCY_VIOLATION: &str = "Registry consistency violation";
pub const ERR_BELOW_MIN_PLEDGE: &str = "Below minimum pledge";
pub const ERR_ZERO_PLEDGE: &str = "Pledge amount must be positive";
pub const ERR_NOTHING_TO_WITHDRAW: &str = "Nothing to withdraw";
