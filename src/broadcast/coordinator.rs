//! Sign, build, submit, and classify, with one sequence-correction retry.
//!
//! # State Transitions
//! ```text
//! Attempting(seq) → Done(response, seq)      check_tx code != 3, or retry already used
//! Attempting(seq) → Attempting(expected)     check_tx code == 3 and log has "expected N"
//! Attempting(seq) → MalformedSequence error  check_tx code == 3 and no "expected N"
//! ```

use serde_json::Value;

use crate::broadcast::sequence::{parse_expected_sequence, INVALID_SEQUENCE_CODE};
use crate::error::{ClientError, ClientResult, TxStage};
use crate::observability::metrics;
use crate::rpc::types::{BroadcastTxResponse, TxOutcome};
use crate::rpc::Rpc;
use crate::tx::TxBuilder;

/// Initial submission plus the single sequence-correction retry.
pub const MAX_SUBMISSIONS: u32 = 2;

#[derive(Debug)]
enum AttemptState {
    Attempting(u64),
    /// Final response and the sequence it was signed with.
    Done {
        response: BroadcastTxResponse,
        sequence: u64,
    },
}

/// Outcome of an accepted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastReceipt {
    pub hash: String,
    pub height: u64,
    /// Sequence the accepted transaction was signed with.
    pub sequence: u64,
    /// Whether the node's expected-sequence hint was used.
    pub sequence_corrected: bool,
    pub check_tx: TxOutcome,
    pub deliver_tx: TxOutcome,
}

/// Map a two-phase response to success or a stage-specific rejection.
pub fn classify(response: &BroadcastTxResponse) -> ClientResult<()> {
    if !response.check_tx.is_ok() {
        return Err(ClientError::CheckTxFailed {
            code: response.check_tx.code(),
            log: response.check_tx.log().to_string(),
        });
    }
    if !response.deliver_tx.is_ok() {
        return Err(ClientError::DeliverTxFailed {
            code: response.deliver_tx.code(),
            log: response.deliver_tx.log().to_string(),
        });
    }
    Ok(())
}

fn next_state(
    response: BroadcastTxResponse,
    sequence: u64,
    attempt: u32,
) -> ClientResult<AttemptState> {
    if response.check_tx.code() != INVALID_SEQUENCE_CODE || attempt >= MAX_SUBMISSIONS {
        return Ok(AttemptState::Done { response, sequence });
    }
    let expected = parse_expected_sequence(response.check_tx.log())?;
    metrics::record_sequence_retry();
    tracing::warn!(
        sent = sequence,
        expected = expected,
        "Sequence mismatch, resubmitting with node's expected sequence"
    );
    Ok(AttemptState::Attempting(expected))
}

/// Drives transactions from messages to a classified node result.
pub struct BroadcastCoordinator<R> {
    rpc: R,
    builder: TxBuilder,
}

impl<R: Rpc> BroadcastCoordinator<R> {
    pub fn new(rpc: R, builder: TxBuilder) -> Self {
        Self { rpc, builder }
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub fn builder(&self) -> &TxBuilder {
        &self.builder
    }

    async fn submit(
        &self,
        msg_type: &str,
        msgs: &[Value],
        sequence: u64,
        attempt: u32,
    ) -> ClientResult<BroadcastTxResponse> {
        // Rebuilt from scratch on every attempt.
        let tx = self.builder.build(msg_type, msgs, sequence)?;
        let encoded = tx.encode()?;

        metrics::record_broadcast_attempt();
        tracing::debug!(sequence = sequence, attempt = attempt, "Submitting transaction");

        let response = self.rpc.broadcast_tx_commit(&encoded).await?;
        tracing::debug!(
            sequence = sequence,
            attempt = attempt,
            check_code = response.check_tx.code(),
            deliver_code = response.deliver_tx.code(),
            hash = %response.hash,
            "Broadcast response received"
        );
        Ok(response)
    }

    /// Sign and submit `msgs`, starting at `sequence` (zero if not given).
    ///
    /// Resubmits at most once, and only when the node rejects the sequence and
    /// names the one it expects.
    pub async fn broadcast(
        &self,
        msg_type: &str,
        msgs: &[Value],
        sequence: Option<u64>,
    ) -> ClientResult<BroadcastReceipt> {
        let mut state = AttemptState::Attempting(sequence.unwrap_or(0));
        let mut attempt = 0;

        let (response, used_sequence) = loop {
            match state {
                AttemptState::Attempting(seq) => {
                    attempt += 1;
                    let response = self.submit(msg_type, msgs, seq, attempt).await?;
                    state = next_state(response, seq, attempt)?;
                }
                AttemptState::Done { response, sequence } => break (response, sequence),
            }
        };

        if let Err(e) = classify(&response) {
            let stage = e.stage().unwrap_or(TxStage::Check);
            metrics::record_tx_rejected(stage);
            tracing::warn!(
                stage = %stage,
                code = e.code().unwrap_or_default(),
                sequence = used_sequence,
                "Transaction rejected"
            );
            return Err(e);
        }

        tracing::info!(
            hash = %response.hash,
            height = response.height,
            sequence = used_sequence,
            "Transaction committed"
        );

        Ok(BroadcastReceipt {
            hash: response.hash,
            height: response.height,
            sequence: used_sequence,
            sequence_corrected: attempt > 1,
            check_tx: response.check_tx,
            deliver_tx: response.deliver_tx,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(check: TxOutcome, deliver: TxOutcome) -> BroadcastTxResponse {
        BroadcastTxResponse {
            check_tx: check,
            deliver_tx: deliver,
            hash: "AB".to_string(),
            height: 1,
        }
    }

    #[test]
    fn test_classify_success() {
        assert!(classify(&response(TxOutcome::ok(), TxOutcome::ok())).is_ok());
    }

    #[test]
    fn test_classify_deliver_failure() {
        let err = classify(&response(TxOutcome::ok(), TxOutcome::failed(5, "boom"))).unwrap_err();
        assert!(matches!(err, ClientError::DeliverTxFailed { code: 5, .. }));
        assert_eq!(err.stage(), Some(TxStage::Deliver));
    }

    #[test]
    fn test_classify_check_wins_over_deliver() {
        let err = classify(&response(
            TxOutcome::failed(2, "bad"),
            TxOutcome::failed(5, "boom"),
        ))
        .unwrap_err();
        assert!(matches!(err, ClientError::CheckTxFailed { code: 2, .. }));
    }

    #[test]
    fn test_next_state_retries_once() {
        let stale = response(TxOutcome::failed(3, "expected 7"), TxOutcome::ok());
        match next_state(stale.clone(), 0, 1).unwrap() {
            AttemptState::Attempting(7) => {}
            other => panic!("expected retry at 7, got {:?}", other),
        }
        assert!(matches!(
            next_state(stale, 7, 2).unwrap(),
            AttemptState::Done { sequence: 7, .. }
        ));
    }

    #[test]
    fn test_done_keeps_submitted_sequence() {
        let accepted = response(TxOutcome::ok(), TxOutcome::ok());
        match next_state(accepted, 12, 1).unwrap() {
            AttemptState::Done { response, sequence } => {
                assert_eq!(sequence, 12);
                assert_eq!(response.hash, "AB");
            }
            other => panic!("expected done, got {:?}", other),
        }
    }

    #[test]
    fn test_next_state_malformed_log() {
        let stale = response(TxOutcome::failed(3, "bad nonce"), TxOutcome::ok());
        assert!(matches!(
            next_state(stale, 0, 1),
            Err(ClientError::MalformedSequence { .. })
        ));
    }
}
