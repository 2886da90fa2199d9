//! Status helper enum mapping to the SMALLSERIAL lookup table.
//!
//! Variant discriminants match the seed data order (1-based) in the
//! `swap_request_statuses` table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

/// Swap request lifecycle status.
///
/// `Pending` is initial; `Rejected`, `Completed`, and `Cancelled` are
/// terminal. The transition rules live in
/// [`skillswap_core::swap_lifecycle`].
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStatus {
    Pending = 1,
    Accepted = 2,
    Rejected = 3,
    Completed = 4,
    Cancelled = 5,
}

impl SwapStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }
}

impl From<SwapStatus> for StatusId {
    fn from(value: SwapStatus) -> Self {
        value as StatusId
    }
}
