//! End-to-end confirmation flow tests over a scripted chain.
//!
//! Timing-sensitive tests run on Tokio's paused clock, so "10 seconds of
//! polling" completes instantly and deterministically.

use std::time::Duration;

use tx_watcher::chain::types::ChainError;
use tx_watcher::watcher::{
    ConfirmationRequest, ConfirmationStatus, ConfirmationWaiter, RequestError,
};

mod common;
use common::{revert_receipt, success_receipt, ScriptedChain, HANDLE, OTHER_HANDLE};

fn request(poll_ms: u64, timeout_ms: u64) -> ConfirmationRequest {
    ConfirmationRequest::new(HANDLE)
        .with_poll_interval(Duration::from_millis(poll_ms))
        .with_timeout(Duration::from_millis(timeout_ms))
}

#[tokio::test(start_paused = true)]
async fn test_confirmed_when_inclusion_reported_within_budget() {
    // Inclusion shows up on the 3rd poll (2s interval, 10s budget)
    let chain = ScriptedChain::new(
        vec![Ok(None), Ok(None), Ok(Some(success_receipt(100)))],
        100,
    );
    let waiter = ConfirmationWaiter::new(&chain);

    let started = tokio::time::Instant::now();
    let status = waiter
        .wait_for_confirmation(&request(2_000, 10_000))
        .await
        .unwrap();

    match status {
        ConfirmationStatus::Confirmed { receipt } => assert_eq!(receipt.block_number, 100),
        other => panic!("expected confirmed, got {:?}", other),
    }
    assert_eq!(chain.receipt_queries(), 3);
    assert!(started.elapsed() < Duration::from_millis(10_000));
}

#[tokio::test(start_paused = true)]
async fn test_times_out_even_when_polls_keep_succeeding() {
    // Every poll answers "not yet included"; the budget must still win
    let chain = ScriptedChain::new(vec![Ok(None)], 0);
    let waiter = ConfirmationWaiter::new(&chain);

    let started = tokio::time::Instant::now();
    let status = waiter
        .wait_for_confirmation(&request(2_000, 10_000))
        .await
        .unwrap();

    let waited = match status {
        ConfirmationStatus::TimedOut { waited } => waited,
        other => panic!("expected timed out, got {:?}", other),
    };
    // At or just after the configured budget
    assert!(started.elapsed() >= Duration::from_millis(10_000));
    assert!(started.elapsed() < Duration::from_millis(11_000));
    assert!(waited >= Duration::from_millis(10_000));
    assert!(chain.receipt_queries() >= 5);
}

#[tokio::test(start_paused = true)]
async fn test_failed_when_every_query_is_transient_error() {
    let chain = ScriptedChain::new(vec![Err(ChainError::Rpc("gateway unavailable".into()))], 0);
    let waiter = ConfirmationWaiter::new(&chain);

    let mut req = request(2_000, 180_000);
    req.retry_count = 5;
    req.retry_delay = Duration::from_millis(2_000);

    let status = waiter.wait_for_confirmation(&req).await.unwrap();
    match status {
        ConfirmationStatus::Failed {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 6);
            assert_eq!(last_error, ChainError::Rpc("gateway unavailable".into()));
        }
        other => panic!("expected failed, got {:?}", other),
    }
    // Initial attempt plus five retries, then nothing
    assert_eq!(chain.receipt_queries(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_cancels_remaining_retry_budget() {
    let chain = ScriptedChain::new(vec![Err(ChainError::Rpc("down".into()))], 0);
    let waiter = ConfirmationWaiter::new(&chain);

    let mut req = request(1_000, 5_000);
    req.retry_count = 50;
    req.retry_delay = Duration::from_millis(2_000);

    let status = waiter.wait_for_confirmation(&req).await.unwrap();
    assert!(matches!(status, ConfirmationStatus::TimedOut { .. }));
    assert!(chain.receipt_queries() < 51);
}

#[tokio::test(start_paused = true)]
async fn test_reverted_transaction_passes_receipt_through() {
    let chain = ScriptedChain::new(vec![Ok(None), Ok(Some(revert_receipt(7)))], 7);
    let waiter = ConfirmationWaiter::new(&chain);

    let status = waiter
        .wait_for_confirmation(&request(2_000, 60_000))
        .await
        .unwrap();

    match status {
        ConfirmationStatus::Reverted { receipt } => {
            assert_eq!(receipt.block_number, 7);
            assert!(receipt.reverted());
        }
        other => panic!("expected reverted, got {:?}", other),
    }
    assert_eq!(chain.receipt_queries(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_waits_for_configured_confirmation_depth() {
    // Head advances one block per query; depth 3 is reached two polls
    // after inclusion
    let chain =
        ScriptedChain::new(vec![Ok(Some(success_receipt(100)))], 100).with_advancing_head(1);
    let waiter = ConfirmationWaiter::new(&chain);

    let req = request(2_000, 60_000).with_required_confirmations(3);
    let status = waiter.wait_for_confirmation(&req).await.unwrap();

    assert!(status.is_confirmed());
    assert_eq!(status.receipt().unwrap().block_number, 100);
    assert_eq!(chain.receipt_queries(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_transient_errors_absorbed_within_budget() {
    let chain = ScriptedChain::new(
        vec![
            Err(ChainError::Rpc("flaky".into())),
            Err(ChainError::Timeout(5)),
            Ok(Some(success_receipt(10))),
        ],
        10,
    );
    let waiter = ConfirmationWaiter::new(&chain);

    let status = waiter
        .wait_for_confirmation(&request(2_000, 60_000))
        .await
        .unwrap();

    assert!(status.is_confirmed());
    // Two retries spent inside the first poll's budget
    assert_eq!(chain.receipt_queries(), 3);
}

#[tokio::test]
async fn test_settled_chain_is_idempotent() {
    let chain = ScriptedChain::new(vec![Ok(Some(success_receipt(50)))], 60);
    let waiter = ConfirmationWaiter::new(&chain);
    let req = request(10, 5_000).with_required_confirmations(5);

    let first = waiter.wait_for_confirmation(&req).await.unwrap();
    let second = waiter.wait_for_confirmation(&req).await.unwrap();

    assert!(first.is_confirmed());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_invalid_handle_issues_no_queries() {
    let chain = ScriptedChain::new(vec![Ok(None)], 0);
    let waiter = ConfirmationWaiter::new(&chain);

    let result = waiter
        .wait_for_confirmation(&ConfirmationRequest::new("0xdeadbeef"))
        .await;

    assert!(matches!(result, Err(RequestError::InvalidHandle(_))));
    assert_eq!(chain.receipt_queries(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_waits_share_one_backend() {
    let chain = ScriptedChain::new(vec![Ok(None), Ok(Some(success_receipt(5)))], 5);
    let waiter = ConfirmationWaiter::new(&chain);

    let first = request(2_000, 20_000);
    let second = ConfirmationRequest::new(OTHER_HANDLE)
        .with_poll_interval(Duration::from_millis(2_000))
        .with_timeout(Duration::from_millis(20_000));

    let (a, b) = tokio::join!(
        waiter.wait_for_confirmation(&first),
        waiter.wait_for_confirmation(&second),
    );

    assert!(a.unwrap().is_confirmed());
    assert!(b.unwrap().is_confirmed());
}
