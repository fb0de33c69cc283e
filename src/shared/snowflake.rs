//! Snowflake ID Generator
//!
//! Time-ordered 64-bit ids: 41 bits of milliseconds since the storefront
//! epoch, 10 bits of machine id and a 12-bit per-millisecond sequence.
//! Ids sort in creation order, which keyset pagination relies on as the
//! tie-breaker after `created_at`.

use chrono::Utc;
use parking_lot::Mutex;

/// Storefront epoch (2023-01-01T00:00:00.000Z)
pub const STOREFRONT_EPOCH: u64 = 1_672_531_200_000;

const MACHINE_BITS: u64 = 10;
const SEQUENCE_BITS: u64 = 12;
const MAX_MACHINE_ID: u64 = (1 << MACHINE_BITS) - 1;
const MAX_SEQUENCE: u64 = (1 << SEQUENCE_BITS) - 1;

#[derive(Debug, Default)]
struct GeneratorState {
    last_timestamp: u64,
    sequence: u64,
}

/// Snowflake ID generator
#[derive(Debug)]
pub struct SnowflakeGenerator {
    machine_id: u64,
    state: Mutex<GeneratorState>,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator
    pub fn new(machine_id: u64) -> Self {
        Self {
            machine_id: machine_id & MAX_MACHINE_ID,
            state: Mutex::new(GeneratorState::default()),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let mut state = self.state.lock();
        let mut timestamp = current_timestamp().max(state.last_timestamp);

        if timestamp == state.last_timestamp {
            state.sequence = (state.sequence + 1) & MAX_SEQUENCE;
            if state.sequence == 0 {
                // Sequence exhausted for this millisecond; borrow the next one.
                timestamp += 1;
            }
        } else {
            state.sequence = 0;
        }
        state.last_timestamp = timestamp;

        let id = ((timestamp - STOREFRONT_EPOCH) << (MACHINE_BITS + SEQUENCE_BITS))
            | (self.machine_id << SEQUENCE_BITS)
            | state.sequence;

        id as i64
    }
}

fn current_timestamp() -> u64 {
    Utc::now().timestamp_millis().max(STOREFRONT_EPOCH as i64) as u64
}
