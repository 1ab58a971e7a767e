use crate::round::{Balance, RaffleState};

/// Every way a raffle operation can fail. Returned synchronously to the
/// caller of the failing message; nothing is retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Error {
    /// Transferred value is below the entrance fee.
    InsufficientFee,
    /// Entry attempted while a randomness request is outstanding.
    NotOpen,
    /// Settlement initiation attempted while the round is not ready.
    UpkeepNotNeeded {
        balance: Balance,
        num_players: u32,
        state: RaffleState,
    },
    /// Fulfillment for an id that is not the pending request.
    UnknownRequest,
    /// Payout to the winner did not go through. Round state is already reset.
    TransferFailed,
    /// Only the configured VRF coordinator may deliver randomness.
    OnlyCoordinatorCanFulfill,
    /// Fulfillment carried no random words.
    NoRandomWords,
    /// Pending request with an empty participant list; `initiate` and the
    /// closed phase make this unreachable.
    NoParticipants,
    /// Cross-contract call to the coordinator failed.
    RandomnessRequestFailed,
    /// Arithmetic overflow.
    Overflow,
}

pub type Result<T> = core::result::Result<T, Error>;
