//! Concurrent notification stress tests for the counting observer.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use accept_probe::config::StressConfig;
use accept_probe::{ConnectionEventCallback, ConnectionEventCounts, EventCounterObserver, NativeHandle};

fn assert_no_counter_decreased(before: &ConnectionEventCounts, after: &ConnectionEventCounts) {
    for ((name, old), (_, new)) in before.entries().into_iter().zip(after.entries()) {
        assert!(new >= old, "{} went backwards: {} -> {}", name, old, new);
    }
}

#[test]
fn test_no_lost_increments_under_contention() {
    let StressConfig {
        threads,
        notifications_per_thread,
    } = StressConfig::default();
    let total = (threads * notifications_per_thread) as u64;
    assert!(threads >= 4 && total >= 10_000);

    let observer = Arc::new(EventCounterObserver::new());
    let done = Arc::new(AtomicBool::new(false));
    let peer: SocketAddr = "10.0.0.1:443".parse().unwrap();

    let reader = {
        let observer = Arc::clone(&observer);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut last = ConnectionEventCounts::default();
            let mut reads = 0u64;
            loop {
                let finished = done.load(Ordering::Acquire);
                let now = observer.snapshot();
                assert_no_counter_decreased(&last, &now);
                // One shared hold: every ended backoff has a started one.
                assert!(now.backoff_started >= now.backoff_ended);
                last = now;
                reads += 1;
                if finished {
                    break;
                }
            }
            reads
        })
    };

    let writers: Vec<_> = (0..threads)
        .map(|i| {
            let observer = Arc::clone(&observer);
            thread::spawn(move || {
                let handle = NativeHandle::from_raw((100 + i) as _);
                for _ in 0..notifications_per_thread {
                    observer.on_connection_accepted(handle, &peer);
                    observer.on_connection_enqueued_for_acceptor_callback(handle, &peer);
                    observer.on_connection_dequeued_by_acceptor_callback(handle, &peer);
                    observer.on_connection_dropped(handle, &peer);
                    observer.on_connection_accept_error(24);
                    observer.on_backoff_started();
                    observer.on_backoff_ended();
                    observer.on_backoff_error();
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    done.store(true, Ordering::Release);
    let reads = reader.join().unwrap();

    assert!(reads > 0);
    assert_eq!(observer.connection_accepted(), total);
    assert_eq!(observer.connection_accept_error(), total);
    assert_eq!(observer.connection_dropped(), total);
    assert_eq!(observer.connection_enqueued_for_accept_callback(), total);
    assert_eq!(observer.connection_dequeued_by_accept_callback(), total);
    assert_eq!(observer.backoff_started(), total);
    assert_eq!(observer.backoff_ended(), total);
    assert_eq!(observer.backoff_error(), total);
}

#[test]
fn test_counters_are_independent_across_threads() {
    let observer = Arc::new(EventCounterObserver::new());
    let peer: SocketAddr = "[::1]:8443".parse().unwrap();
    let per_thread = 1_000;

    thread::scope(|s| {
        s.spawn(|| (0..per_thread).for_each(|_| observer.on_connection_dropped(NativeHandle::INVALID, &peer)));
        s.spawn(|| (0..per_thread).for_each(|_| observer.on_connection_accept_error(24)));
        s.spawn(|| (0..per_thread).for_each(|_| observer.on_backoff_error()));
        s.spawn(|| {
            (0..per_thread).for_each(|_| {
                observer.on_connection_enqueued_for_acceptor_callback(NativeHandle::INVALID, &peer);
                observer.on_connection_dequeued_by_acceptor_callback(NativeHandle::INVALID, &peer);
            })
        });
    });

    assert_eq!(
        observer.snapshot(),
        ConnectionEventCounts {
            connection_dropped: per_thread,
            connection_accept_error: per_thread,
            backoff_error: per_thread,
            connection_enqueued_for_accept_callback: per_thread,
            connection_dequeued_by_accept_callback: per_thread,
            ..ConnectionEventCounts::default()
        }
    );
}
