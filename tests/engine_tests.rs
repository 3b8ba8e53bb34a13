//! Integration tests for the wallet engine
//!
//! These tests exercise the public API under real concurrency:
//! - no lost updates for concurrent credits on one user
//! - atomic all-or-nothing debits under contention
//! - independence of different users' queues
//! - the end-to-end workload pipeline

use std::sync::Arc;
use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use wallet_engine::{process_workload, WalletEngine, WalletError};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_credits_on_one_user_lose_no_updates() {
    let engine = Arc::new(WalletEngine::new());

    let mut handles = vec![];
    for _ in 0..100 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine.credit("u1", Decimal::ONE).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(
        engine.get_balance("u1").await.unwrap(),
        Decimal::new(100, 0)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_debits_never_overdraw() {
    let engine = Arc::new(WalletEngine::new());
    engine.credit("u1", Decimal::new(5000, 2)).await.unwrap();

    // 20 debits of 10.00 against a balance of 50.00: exactly 5 can commit.
    let mut handles = vec![];
    for _ in 0..20 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine.debit("u1", Decimal::new(1000, 2)).await
        }));
    }

    let mut committed = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(balance) => {
                assert!(!balance.is_sign_negative());
                committed += 1;
            }
            Err(WalletError::InsufficientBalance { .. }) => rejected += 1,
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(committed, 5);
    assert_eq!(rejected, 15);
    assert_eq!(engine.get_balance("u1").await.unwrap(), Decimal::ZERO);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn mixed_concurrent_operations_conserve_funds() {
    let engine = Arc::new(WalletEngine::new());
    engine.credit("u1", Decimal::new(100000, 2)).await.unwrap();

    let mut handles = vec![];
    for i in 0..40 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            let amount = Decimal::new(1000, 2);
            if i % 2 == 0 {
                engine.credit("u1", amount).await.unwrap();
            } else {
                // Debits cannot fail here: the seeded balance covers the
                // total debit volume under every interleaving.
                engine.debit("u1", amount).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(
        engine.get_balance("u1").await.unwrap(),
        Decimal::new(100000, 2)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn slow_user_does_not_delay_other_users() {
    let engine = Arc::new(WalletEngine::new());

    // Saturate user a's queue with enough operations to keep it busy.
    let mut slow_handles = vec![];
    for _ in 0..500 {
        let engine = Arc::clone(&engine);
        slow_handles.push(tokio::spawn(async move {
            engine.credit("a", Decimal::ONE).await.unwrap();
        }));
    }

    let start = Instant::now();
    engine.credit("b", Decimal::ONE).await.unwrap();
    let elapsed = start.elapsed();

    assert!(
        elapsed < Duration::from_millis(500),
        "user b waited {:?} behind user a's queue",
        elapsed
    );

    for handle in slow_handles {
        handle.await.unwrap();
    }
    assert_eq!(engine.get_balance("a").await.unwrap(), Decimal::new(500, 0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn many_users_in_parallel_each_stay_consistent() {
    let engine = Arc::new(WalletEngine::new());

    let mut handles = vec![];
    for user in 0..10 {
        for _ in 0..20 {
            let engine = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                let id = format!("user-{}", user);
                engine.credit(&id, Decimal::new(250, 2)).await.unwrap();
            }));
        }
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let accounts = engine.accounts();
    assert_eq!(accounts.len(), 10);
    for account in accounts {
        assert_eq!(account.balance, Decimal::new(5000, 2));
    }
}

#[tokio::test]
async fn end_to_end_workload_produces_expected_balances() {
    use std::io::Write as _;

    let mut input = tempfile::NamedTempFile::new().unwrap();
    input
        .write_all(
            b"op,user,amount\n\
              credit,u1,100.00\n\
              debit,u1,30.00\n\
              debit,u1,1000.00\n\
              credit,u2,5.50\n\
              debit,ghost,1.00\n",
        )
        .unwrap();
    input.flush().unwrap();

    let mut output = Vec::new();
    let applied = process_workload(input.path(), &mut output).await.unwrap();

    // The oversized debit and the unknown-user debit are rejected.
    assert_eq!(applied, 3);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "user,balance\nu1,70.00\nu2,5.50\n"
    );
}
