//! Integration Tests for the Expiring Cache
//!
//! Exercises the public handle with the reaper running on a real runtime.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pokecache::{Cache, CacheError, Config};
use tokio_test::{assert_err, assert_ok};

// == Helper Functions ==

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn new_cache(ttl: Duration) -> Cache {
    init_tracing();
    assert_ok!(Cache::new(ttl))
}

// == Add / Get ==

#[tokio::test]
async fn test_add_get() {
    let cases: [(&str, &[u8]); 2] = [
        ("https://example.com", b"testdata"),
        ("https://example.com/path", b"moretestdata"),
    ];

    for (key, value) in cases {
        let cache = new_cache(Duration::from_millis(5));
        cache.add(key, value);

        assert_eq!(cache.get(key).as_deref(), Some(value), "expected to find {}", key);
    }
}

#[tokio::test]
async fn test_get_nonexistent_key() {
    let cache = new_cache(Duration::from_millis(5));
    assert_eq!(cache.get("pikachu"), None);
}

#[tokio::test]
async fn test_add_overwrite_existing_key() {
    let cache = new_cache(Duration::from_secs(300));

    cache.add("pokemon", "pikachu");
    cache.add("pokemon", "charizard");

    assert_eq!(cache.get("pokemon"), Some(b"charizard".to_vec()));
}

#[tokio::test]
async fn test_add_empty_key() {
    let cache = new_cache(Duration::from_secs(300));
    cache.add("", "pikachu");
    assert_eq!(cache.get(""), None);
}

#[tokio::test]
async fn test_add_empty_value() {
    let cache = new_cache(Duration::from_secs(300));
    cache.add("pokemon", Vec::<u8>::new());
    cache.add("pokemon", "");
    assert_eq!(cache.get("pokemon"), None);
}

// == Expiry ==

#[tokio::test]
async fn test_reap_loop() {
    let cache = new_cache(Duration::from_millis(5));
    cache.add("u", "d");

    assert_eq!(cache.get("u"), Some(b"d".to_vec()));

    // TTL plus a full extra sweep period, with slack for scheduling
    tokio::time::sleep(Duration::from_millis(30)).await;

    assert_eq!(cache.get("u"), None, "expected key to be reaped");
}

#[tokio::test]
async fn test_reap_loop_multiple_entries() {
    let urls = [
        "https://example.com",
        "https://example2.com",
        "https://example3.com",
    ];
    let cache = new_cache(Duration::from_millis(10));
    for url in urls {
        cache.add(url, "testdata");
    }

    assert!(cache.get(urls[0]).is_some());

    tokio::time::sleep(Duration::from_millis(50)).await;

    for url in urls {
        assert_eq!(cache.get(url), None, "expected {} to be reaped", url);
    }
    assert!(cache.stats().reaped >= 3);
}

#[tokio::test]
async fn test_reap_loop_partial_expiration() {
    let cache = new_cache(Duration::from_millis(20));

    cache.add("https://example.com", "testdata");
    cache.add("https://example2.com", "testdata");
    tokio::time::sleep(Duration::from_millis(80)).await;
    cache.add("https://example3.com", "testdata");

    assert_eq!(cache.get("https://example.com"), None);
    assert_eq!(cache.get("https://example2.com"), None);
    assert!(cache.get("https://example3.com").is_some());
}

#[tokio::test]
async fn test_overwrite_resets_age() {
    let cache = new_cache(Duration::from_millis(200));

    cache.add("pokemon", "pikachu");
    tokio::time::sleep(Duration::from_millis(150)).await;
    cache.add("pokemon", "charizard");
    tokio::time::sleep(Duration::from_millis(150)).await;

    // 300ms after the first write, but only 150ms after the refresh
    assert_eq!(cache.get("pokemon"), Some(b"charizard".to_vec()));
}

#[tokio::test]
async fn test_no_premature_expiration() {
    let cache = new_cache(Duration::from_secs(1));
    cache.add("https://example.com", "testdata");

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(cache.get("https://example.com").is_some(), "expected to find key");
}

#[tokio::test]
async fn test_stale_entry_served_until_sweep() {
    let mut cache = new_cache(Duration::from_millis(10));
    cache.stop_reaper();

    cache.add("https://example.com", "testdata");
    tokio::time::sleep(Duration::from_millis(30)).await;

    // Past its TTL, but no sweep has run
    assert!(cache.get("https://example.com").is_some());

    assert_eq!(cache.reap_now(), 1);
    assert_eq!(cache.get("https://example.com"), None);
}

// == Concurrency ==

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_access() {
    let cache = Arc::new(new_cache(Duration::from_secs(1)));

    let writers: Vec<_> = ["https://example.com", "https://example2.com"]
        .into_iter()
        .map(|url| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.add(url, "testdata"))
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    assert!(cache.get("https://example.com").is_some());
    assert!(cache.get("https://example2.com").is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_reap() {
    let cache = new_cache(Duration::from_millis(10));

    thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..20 {
                cache.add(format!("url{}", i), "data");
                thread::sleep(Duration::from_millis(2));
            }
        });
        scope.spawn(|| {
            for i in 0..20 {
                cache.get(&format!("url{}", i));
                thread::sleep(Duration::from_millis(2));
            }
        });
    });

    // The reaper kept running alongside the callers
    assert!(cache.is_reaper_running());
    assert!(cache.stats().sweeps > 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_overlapping_keys_found_before_ttl() {
    let cache = new_cache(Duration::from_secs(5));

    thread::scope(|scope| {
        for worker in 0..8 {
            let cache = &cache;
            scope.spawn(move || {
                for i in 0..100 {
                    // Half the keys are shared between workers
                    let key = if i % 2 == 0 {
                        format!("shared{}", i)
                    } else {
                        format!("worker{}-{}", worker, i)
                    };
                    cache.add(key.clone(), format!("{}", worker));
                    assert!(cache.get(&key).is_some(), "expected to find {}", key);
                }
            });
        }
    });

    assert_eq!(cache.len(), 50 + 8 * 50);
}

// == Lifecycle ==

#[tokio::test]
async fn test_zero_ttl_rejected() {
    let err = assert_err!(Cache::new(Duration::ZERO));
    assert_eq!(err, CacheError::InvalidTtl);
}

#[tokio::test]
async fn test_unschedulable_ttl_rejected() {
    let err = assert_err!(Cache::new(Duration::MAX));
    assert_eq!(err, CacheError::InvalidTtl);
}

#[test]
fn test_new_outside_runtime_fails() {
    let err = assert_err!(Cache::new(Duration::from_secs(1)));
    assert_eq!(err, CacheError::NoRuntime);
}

#[tokio::test]
async fn test_from_default_config() {
    let cache = assert_ok!(Cache::from_config(&Config::default()));
    assert_eq!(cache.ttl(), Duration::from_secs(5));
}

#[tokio::test]
async fn test_stop_reaper_halts_expiry() {
    let mut cache = new_cache(Duration::from_millis(10));
    assert!(cache.is_reaper_running());

    assert!(cache.stop_reaper());
    cache.add("pokemon", "pikachu");
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(!cache.is_reaper_running());
    assert_eq!(cache.get("pokemon"), Some(b"pikachu".to_vec()));
}

#[tokio::test]
async fn test_shutdown_completes() {
    let cache = new_cache(Duration::from_millis(10));
    cache.add("pokemon", "pikachu");

    tokio::time::timeout(Duration::from_secs(1), cache.shutdown())
        .await
        .expect("shutdown should finish promptly");
}
