//! Broadcast subsystem.
//!
//! # Data Flow
//! ```text
//! messages + starting sequence
//!     → coordinator.rs (TxBuilder: sign + build, Rpc: broadcast_tx_commit)
//!     → check_tx code 3? → sequence.rs ("expected N") → rebuild and resubmit once
//!     → classify check_tx / deliver_tx → BroadcastReceipt or stage error
//! ```
//!
//! # Design Decisions
//! - The retry is correctness-driven, not time-based; there is no backoff
//! - At most one retry: a second stale-sequence answer is surfaced as CheckTxFailed
//! - Submissions are sequential; nothing is shared between calls

pub mod coordinator;
pub mod sequence;

pub use coordinator::{classify, BroadcastCoordinator, BroadcastReceipt, MAX_SUBMISSIONS};
pub use sequence::{parse_expected_sequence, INVALID_SEQUENCE_CODE};
