use std::sync::Barrier;
use std::thread;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_builds_once_per_key() {
    let cache = SpecializationCache::<&str, u32>::new();
    let a = cache.get_or_create(&"a", || Ok::<_, ()>(1)).unwrap();
    let again = cache.get_or_create(&"a", || Ok::<_, ()>(2)).unwrap();
    assert!(Arc::ptr_eq(&a, &again));
    assert_eq!(*again, 1);
    cache.get_or_create(&"b", || Ok::<_, ()>(3)).unwrap();
    assert_eq!(cache.builds(), 2);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(&"b").as_deref(), Some(&3));
    assert_eq!(cache.get(&"c"), None);
}

#[test]
fn test_failed_build_leaves_no_entry() {
    let cache = SpecializationCache::<u8, String>::new();
    let err = cache.get_or_create(&1, || Err::<String, _>("boom"));
    assert_eq!(err, Err("boom"));
    assert!(cache.is_empty());
    assert_eq!(cache.get(&1), None);

    let value = cache.get_or_create(&1, || Ok::<_, &str>("fixed".to_string()));
    assert_eq!(value.unwrap().as_str(), "fixed");
    assert_eq!(cache.builds(), 1);
}

#[test]
fn test_concurrent_requests_build_once() {
    let cache = SpecializationCache::<u64, u64>::new();
    let calls = AtomicUsize::new(0);
    let barrier = Barrier::new(8);
    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                barrier.wait();
                let value = cache
                    .get_or_create(&7, || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(std::time::Duration::from_millis(20));
                        Ok::<_, ()>(49)
                    })
                    .unwrap();
                assert_eq!(*value, 49);
            });
        }
    });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.builds(), 1);
}

#[test]
fn test_distinct_keys_do_not_wait_on_each_other() {
    let cache = SpecializationCache::<u8, u8>::new();
    let started = Barrier::new(2);
    // both builds must be in flight at once for the barrier to release
    thread::scope(|s| {
        for key in [1u8, 2] {
            let cache = &cache;
            let started = &started;
            s.spawn(move || {
                cache
                    .get_or_create(&key, || {
                        started.wait();
                        Ok::<_, ()>(key)
                    })
                    .unwrap();
            });
        }
    });
    assert_eq!(cache.len(), 2);
}
