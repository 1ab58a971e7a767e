//! # Round — the raffle state machine
//!
//! One `Round` lives in contract storage for the lifetime of the raffle and
//! is re-initialised in place at every settlement.
//!
//! ```text
//!   enter() ──► OPEN ──initiate()──► CALCULATING ──settle(id, words)──► OPEN
//!                ▲                     (pending id)                      │
//!                └───────────────── ledger reset, payout ◄───────────────┘
//! ```
//!
//! The round reads no ambient state: the caller passes `now`, the oracle and
//! the payout channel.

use ink::{prelude::vec::Vec, primitives::AccountId};

use crate::{
    constants::NUM_WORDS,
    error::{Error, Result},
    oracle::{PayoutChannel, RandomWord, RandomnessOracle, VrfConfig},
};

pub type Balance = u128;
pub type Timestamp = u64;
pub type RequestId = u64;

/// Phase of the current round. Encoded as 0 / 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub enum RaffleState {
    Open,
    Calculating,
}

/// Outcome of the readiness check. Anything other than `Ready` names the
/// first condition that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Readiness {
    Ready,
    NotOpen,
    IntervalPending { remaining: Timestamp },
    NoParticipants,
    EmptyPool,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// A closed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub request_id: RequestId,
    pub winner: AccountId,
    pub winner_index: u32,
    pub prize: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Round {
    phase: RaffleState,
    participants: Vec<AccountId>,
    pooled_balance: Balance,
    last_settlement: Timestamp,
    entrance_fee: Balance,
    interval: Timestamp,
    pending_request: Option<RequestId>,
    recent_winner: Option<AccountId>,
}

impl Round {
    pub fn new(entrance_fee: Balance, interval: Timestamp, now: Timestamp) -> Self {
        Self {
            phase: RaffleState::Open,
            participants: Vec::new(),
            pooled_balance: 0,
            last_settlement: now,
            entrance_fee,
            interval,
            pending_request: None,
            recent_winner: None,
        }
    }

    // =====================================================================
    // ENTRY LEDGER
    // =====================================================================

    /// Record one entry for `caller`. The fee check runs first so an
    /// underpaying caller never touches the ledger.
    pub fn enter(&mut self, caller: AccountId, amount: Balance) -> Result<()> {
        if amount < self.entrance_fee {
            return Err(Error::InsufficientFee);
        }
        if self.phase != RaffleState::Open {
            return Err(Error::NotOpen);
        }

        let pooled = self
            .pooled_balance
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        self.participants.push(caller);
        self.pooled_balance = pooled;
        Ok(())
    }

    // =====================================================================
    // READINESS EVALUATOR
    // =====================================================================

    pub fn readiness(&self, now: Timestamp) -> Readiness {
        if self.phase != RaffleState::Open {
            return Readiness::NotOpen;
        }
        let elapsed = now.saturating_sub(self.last_settlement);
        if elapsed < self.interval {
            return Readiness::IntervalPending {
                remaining: self.interval - elapsed,
            };
        }
        if self.participants.is_empty() {
            return Readiness::NoParticipants;
        }
        if self.pooled_balance == 0 {
            return Readiness::EmptyPool;
        }
        Readiness::Ready
    }

    // =====================================================================
    // RANDOMNESS REQUEST CORRELATOR
    // =====================================================================

    /// Move OPEN → CALCULATING and ask the oracle for one word.
    ///
    /// Readiness is re-checked here; a stale readiness result from a keeper is
    /// never trusted. The phase flips before the oracle is called so any
    /// reentrant entry sees a closed round.
    pub fn initiate<O: RandomnessOracle>(
        &mut self,
        now: Timestamp,
        config: &VrfConfig,
        oracle: &mut O,
    ) -> Result<RequestId> {
        if !self.readiness(now).is_ready() {
            return Err(self.upkeep_not_needed());
        }

        self.phase = RaffleState::Calculating;
        match oracle.request_random_words(config, NUM_WORDS) {
            Ok(request_id) => {
                self.pending_request = Some(request_id);
                Ok(request_id)
            }
            Err(err) => {
                self.phase = RaffleState::Open;
                Err(err)
            }
        }
    }

    fn upkeep_not_needed(&self) -> Error {
        Error::UpkeepNotNeeded {
            balance: self.pooled_balance,
            num_players: self.participants.len() as u32,
            state: self.phase,
        }
    }

    // =====================================================================
    // SETTLEMENT ENGINE
    // =====================================================================

    /// Close the round with the oracle's answer for `request_id`.
    ///
    /// All ledger mutations are committed before the payout, so a reentrant
    /// call during the transfer observes an empty OPEN round. A failed
    /// payout leaves the round reset and the prize held by the contract.
    pub fn settle<P: PayoutChannel>(
        &mut self,
        request_id: RequestId,
        random_words: &[RandomWord],
        now: Timestamp,
        payout: &mut P,
    ) -> Result<Settlement> {
        if self.pending_request != Some(request_id) {
            return Err(Error::UnknownRequest);
        }
        let word = random_words.first().ok_or(Error::NoRandomWords)?;
        let winner_index = word
            .index_for(self.participants.len())
            .ok_or(Error::NoParticipants)?;
        let winner = self.participants[winner_index];
        let prize = self.pooled_balance;

        self.participants.clear();
        self.pooled_balance = 0;
        self.phase = RaffleState::Open;
        self.pending_request = None;
        self.last_settlement = now;
        self.recent_winner = Some(winner);

        payout
            .transfer(winner, prize)
            .map_err(|_| Error::TransferFailed)?;

        Ok(Settlement {
            request_id,
            winner,
            winner_index: winner_index as u32,
            prize,
        })
    }

    // =====================================================================
    // VIEWS
    // =====================================================================

    pub fn phase(&self) -> RaffleState {
        self.phase
    }

    pub fn participants(&self) -> &[AccountId] {
        &self.participants
    }

    pub fn player(&self, index: u32) -> Option<AccountId> {
        self.participants.get(index as usize).copied()
    }

    pub fn pooled_balance(&self) -> Balance {
        self.pooled_balance
    }

    pub fn last_settlement(&self) -> Timestamp {
        self.last_settlement
    }

    pub fn entrance_fee(&self) -> Balance {
        self.entrance_fee
    }

    pub fn interval(&self) -> Timestamp {
        self.interval
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending_request
    }

    pub fn recent_winner(&self) -> Option<AccountId> {
        self.recent_winner
    }
}
