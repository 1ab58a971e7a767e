//! Fixed protocol parameters. Deployment-specific values (fee, interval,
//! gas lane, subscription) are constructor arguments instead.

/// Random words requested per round. One word picks one winner.
pub const NUM_WORDS: u32 = 1;

/// Blocks the coordinator waits before answering a request.
pub const REQUEST_CONFIRMATIONS: u16 = 3;

/// Selector of `request_random_words` on the VRF coordinator contract.
pub const REQUEST_RANDOM_WORDS_SELECTOR: [u8; 4] = ink::selector_bytes!("request_random_words");
