//! Metrics collection.
//!
//! # Metrics
//! - `tendersign_broadcast_attempts_total` (counter): every submission, retries included
//! - `tendersign_sequence_retries_total` (counter): sequence-correction resubmissions
//! - `tendersign_tx_rejected_total` (counter): rejections by `stage`
//! - `tendersign_rpc_health` (gauge): 1=reachable, 0=unreachable

use crate::error::TxStage;

pub fn record_broadcast_attempt() {
    metrics::counter!("tendersign_broadcast_attempts_total").increment(1);
}

pub fn record_sequence_retry() {
    metrics::counter!("tendersign_sequence_retries_total").increment(1);
}

pub fn record_tx_rejected(stage: TxStage) {
    let stage = match stage {
        TxStage::Check => "check_tx",
        TxStage::Deliver => "deliver_tx",
    };
    metrics::counter!("tendersign_tx_rejected_total", "stage" => stage).increment(1);
}

pub fn record_rpc_health(healthy: bool) {
    metrics::gauge!("tendersign_rpc_health").set(if healthy { 1.0 } else { 0.0 });
}
