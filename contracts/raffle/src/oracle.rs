//! Boundary with the randomness oracle and the native value channel.
//!
//! The round never talks to the chain directly. The contract hands it a
//! [`RandomnessOracle`] (cross-contract call to the VRF coordinator) and a
//! [`PayoutChannel`] (native transfer), so the state machine can be driven
//! by in-memory doubles in tests.

use ink::primitives::AccountId;

use crate::{
    error::Result,
    round::{Balance, RequestId},
};

/// One 256-bit random word, big-endian, as delivered by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub struct RandomWord(pub [u8; 32]);

impl RandomWord {
    /// `self mod len`, computed over the full 256 bits.
    ///
    /// Returns `None` for `len == 0`.
    pub fn index_for(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let modulus = len as u128;
        let rem = self
            .0
            .iter()
            .fold(0u128, |acc, byte| (acc * 256 + *byte as u128) % modulus);
        Some(rem as usize)
    }
}

impl From<u128> for RandomWord {
    fn from(value: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[16..].copy_from_slice(&value.to_be_bytes());
        RandomWord(bytes)
    }
}

/// Coordinator request parameters fixed at deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct VrfConfig {
    /// Gas lane: the key hash selecting the coordinator's price tier.
    pub key_hash: [u8; 32],
    /// Subscription that pays for the request.
    pub subscription_id: u64,
    /// Gas budget for the `fulfill_random_words` callback.
    pub callback_gas_limit: u32,
}

/// Issues randomness requests. Returns the correlation id the coordinator
/// will echo back on fulfillment.
pub trait RandomnessOracle {
    fn request_random_words(&mut self, config: &VrfConfig, num_words: u32) -> Result<RequestId>;
}

/// Moves native balance out of the raffle.
pub trait PayoutChannel {
    fn transfer(&mut self, to: AccountId, amount: Balance) -> Result<()>;
}
