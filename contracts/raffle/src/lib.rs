#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod constants;
pub mod error;
pub mod oracle;
pub mod round;

/// # Raffle — autonomous VRF lottery
///
/// **Role:** Collects fixed-fee entries, asks a VRF coordinator for a random
/// word once the round interval has passed, pays the whole pot to the drawn
/// participant and reopens.
///
/// **Flow:**
/// ```text
///   players ──enter_raffle()──► [Raffle] ◄──check_upkeep()── keeper
///                                  │ perform_upkeep()
///                                  ▼
///                        [VRF Coordinator] request_random_words
///                                  │ (later, separate transaction)
///                                  ▼
///                  fulfill_random_words(id, words) ──► winner paid
/// ```
///
/// No account holds special rights over the round. Anyone may check
/// readiness or trigger the request; only the configured coordinator may
/// deliver randomness, and only for the id it handed out.
#[ink::contract]
mod raffle {
    use ink::env::call::{build_call, ExecutionInput, Selector};
    use ink::env::DefaultEnvironment;
    use ink::prelude::vec::Vec;

    use crate::constants::{NUM_WORDS, REQUEST_CONFIRMATIONS, REQUEST_RANDOM_WORDS_SELECTOR};
    use crate::error::{Error, Result};
    use crate::oracle::{PayoutChannel, RandomWord, RandomnessOracle, VrfConfig};
    use crate::round::{RaffleState, Readiness, RequestId, Round};

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct Raffle {
        /// Ledger, phase and pending request of the current round.
        round: Round,

        /// VRF coordinator; the only account allowed to fulfill.
        vrf_coordinator: AccountId,

        /// Request parameters forwarded to the coordinator.
        vrf: VrfConfig,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct Entered {
        #[ink(topic)]
        player: AccountId,
    }

    #[ink(event)]
    pub struct RandomnessRequested {
        #[ink(topic)]
        request_id: RequestId,
    }

    #[ink(event)]
    pub struct WinnerPicked {
        #[ink(topic)]
        winner: AccountId,
        prize: Balance,
    }

    // =========================================================================
    // CHAIN ADAPTERS
    // =========================================================================

    /// Cross-contract request to the VRF coordinator.
    struct Coordinator {
        address: AccountId,
    }

    impl RandomnessOracle for Coordinator {
        fn request_random_words(
            &mut self,
            config: &VrfConfig,
            num_words: u32,
        ) -> Result<RequestId> {
            let result = build_call::<DefaultEnvironment>()
                .call(self.address)
                .exec_input(
                    ExecutionInput::new(Selector::new(REQUEST_RANDOM_WORDS_SELECTOR))
                        .push_arg(config.key_hash)
                        .push_arg(config.subscription_id)
                        .push_arg(REQUEST_CONFIRMATIONS)
                        .push_arg(config.callback_gas_limit)
                        .push_arg(num_words),
                )
                .returns::<RequestId>()
                .try_invoke();

            match result {
                Ok(Ok(request_id)) => Ok(request_id),
                _ => Err(Error::RandomnessRequestFailed),
            }
        }
    }

    /// Native balance transfer out of this contract.
    struct NativeTransfer;

    impl PayoutChannel for NativeTransfer {
        fn transfer(&mut self, to: AccountId, amount: Balance) -> Result<()> {
            ink::env::transfer::<DefaultEnvironment>(to, amount)
                .map_err(|_| Error::TransferFailed)
        }
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl Raffle {
        /// `interval` is in block-timestamp units (milliseconds).
        #[ink(constructor)]
        pub fn new(
            vrf_coordinator: AccountId,
            entrance_fee: Balance,
            gas_lane: [u8; 32],
            subscription_id: u64,
            callback_gas_limit: u32,
            interval: Timestamp,
        ) -> Self {
            Self {
                round: Round::new(entrance_fee, interval, Self::env().block_timestamp()),
                vrf_coordinator,
                vrf: VrfConfig {
                    key_hash: gas_lane,
                    subscription_id,
                    callback_gas_limit,
                },
            }
        }

        // =====================================================================
        // ENTRY
        // =====================================================================

        /// Enter the current round. The transferred value must cover the
        /// entrance fee; anything above it stays in the pot.
        ///
        /// `pooled == fee * players` holds only while every entry pays
        /// exactly the fee.
        #[ink(message, payable)]
        pub fn enter_raffle(&mut self) -> Result<()> {
            let player = self.env().caller();
            let amount = self.env().transferred_value();

            self.round.enter(player, amount)?;
            ink::env::debug_println!(
                "raffle: entry #{} paid {}",
                self.round.participants().len(),
                amount
            );

            self.env().emit_event(Entered { player });
            Ok(())
        }

        // =====================================================================
        // KEEPER INTERFACE
        // =====================================================================

        /// Readiness check. `check_data` is part of the keeper interface and
        /// is not inspected.
        #[ink(message)]
        pub fn check_upkeep(&self, _check_data: Vec<u8>) -> (bool, Readiness) {
            let readiness = self.round.readiness(self.env().block_timestamp());
            (readiness.is_ready(), readiness)
        }

        /// Close the round to entries and request one random word.
        #[ink(message)]
        pub fn perform_upkeep(&mut self, _perform_data: Vec<u8>) -> Result<RequestId> {
            let mut coordinator = Coordinator {
                address: self.vrf_coordinator,
            };
            self.request_with(&mut coordinator)
        }

        fn request_with<O: RandomnessOracle>(&mut self, oracle: &mut O) -> Result<RequestId> {
            let now = self.env().block_timestamp();
            let request_id = self.round.initiate(now, &self.vrf, oracle)?;
            ink::env::debug_println!("raffle: requested randomness, id {}", request_id);

            self.env().emit_event(RandomnessRequested { request_id });
            Ok(request_id)
        }

        // =====================================================================
        // ORACLE CALLBACK
        // =====================================================================

        /// Coordinator callback carrying the random words for `request_id`.
        #[ink(message)]
        pub fn fulfill_random_words(
            &mut self,
            request_id: RequestId,
            random_words: Vec<RandomWord>,
        ) -> Result<()> {
            if self.env().caller() != self.vrf_coordinator {
                return Err(Error::OnlyCoordinatorCanFulfill);
            }

            let now = self.env().block_timestamp();
            let outcome = self
                .round
                .settle(request_id, &random_words, now, &mut NativeTransfer);
            let settlement = match outcome {
                Ok(settlement) => settlement,
                Err(err) => {
                    ink::env::debug_println!(
                        "raffle: fulfillment {} rejected: {:?}",
                        request_id,
                        err
                    );
                    return Err(err);
                }
            };
            ink::env::debug_println!(
                "raffle: request {} settled, slot {} wins {}",
                settlement.request_id,
                settlement.winner_index,
                settlement.prize
            );

            self.env().emit_event(WinnerPicked {
                winner: settlement.winner,
                prize: settlement.prize,
            });
            Ok(())
        }

        // =====================================================================
        // VIEW FUNCTIONS
        // =====================================================================

        #[ink(message)]
        pub fn get_entrance_fee(&self) -> Balance {
            self.round.entrance_fee()
        }

        #[ink(message)]
        pub fn get_raffle_state(&self) -> RaffleState {
            self.round.phase()
        }

        #[ink(message)]
        pub fn get_player(&self, index: u32) -> Option<AccountId> {
            self.round.player(index)
        }

        #[ink(message)]
        pub fn get_number_of_players(&self) -> u32 {
            self.round.participants().len() as u32
        }

        #[ink(message)]
        pub fn get_recent_winner(&self) -> Option<AccountId> {
            self.round.recent_winner()
        }

        #[ink(message)]
        pub fn get_latest_timestamp(&self) -> Timestamp {
            self.round.last_settlement()
        }

        #[ink(message)]
        pub fn get_interval(&self) -> Timestamp {
            self.round.interval()
        }

        #[ink(message)]
        pub fn get_pooled_balance(&self) -> Balance {
            self.round.pooled_balance()
        }

        #[ink(message)]
        pub fn get_pending_request(&self) -> Option<RequestId> {
            self.round.pending_request()
        }

        #[ink(message)]
        pub fn get_num_words(&self) -> u32 {
            NUM_WORDS
        }

        #[ink(message)]
        pub fn get_request_confirmations(&self) -> u16 {
            REQUEST_CONFIRMATIONS
        }

        #[ink(message)]
        pub fn get_vrf_coordinator(&self) -> AccountId {
            self.vrf_coordinator
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================

}
