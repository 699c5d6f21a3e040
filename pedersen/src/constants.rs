//! Constants used by the secret-sharing schemes.

/// Smallest threshold accepted by [`crate::shamir_split`] and the VSS dealer.
pub const MIN_THRESHOLD: usize = 2;

/// Lowest evaluation point handed out as a party id. `0` is reserved for the
/// secret itself.
pub(crate) const MIN_PARTY_ID: i64 = 1;
