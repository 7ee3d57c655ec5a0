use rlblocks_core::{
    error::MemoryError,
    replay_memory::{ReplayMemory, ReplayMemoryConfig},
    BatchMemory, Memory,
};
use std::collections::HashSet;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_push_beyond_capacity() {
    init();

    for capacity in 1..20 {
        let mut memory = ReplayMemory::<usize>::new(capacity).unwrap();
        for i in 0..capacity {
            memory.push(i, false).unwrap();
        }
        assert_eq!(
            memory.push(capacity, false),
            Err(MemoryError::CapacityExceeded { capacity })
        );
        assert_eq!(memory.used(), capacity);
        assert_eq!(memory.available(), 0);
    }
}

#[test]
fn test_overwrite_evicts_oldest_first() {
    init();

    for capacity in 1..20 {
        let mut memory = ReplayMemory::<usize>::new(capacity).unwrap();
        for i in 0..3 * capacity + 1 {
            memory.push(i, true).unwrap();
            assert!(memory.used() <= capacity);

            // The memory always holds the latest `capacity` items.
            let n = (i + 1).min(capacity);
            let kept = memory.iter().copied().collect::<HashSet<_>>();
            let expected = (i + 1 - n..=i).collect::<HashSet<_>>();
            assert_eq!(kept, expected);
        }
        assert_eq!(memory.used(), capacity);
    }
}

#[test]
fn test_pop_then_push() {
    init();

    let config = ReplayMemoryConfig::default().capacity(4);
    let mut memory = ReplayMemory::from_sequence(vec![0, 1, 2, 3], &config).unwrap();

    assert_eq!(memory.pop(), Ok(3));
    assert_eq!(memory.as_slice(), &[0, 1, 2]);
    assert_eq!(memory.position(), 3);

    // Refill, then the next overwrite lands on the cursor.
    memory.push(4, false).unwrap();
    memory.push(5, true).unwrap();
    assert_eq!(memory.as_slice(), &[0, 1, 2, 5]);
    assert_eq!(memory.position(), 0);
}

#[test]
fn test_length_bound_under_mixed_operations() {
    init();

    let capacity = 7;
    let config = ReplayMemoryConfig::default().capacity(capacity).seed(11);
    let mut memory = ReplayMemory::<usize>::build(&config).unwrap();

    for step in 0..500usize {
        match step % 5 {
            0 | 1 | 2 => {
                let overwrite = step % 2 == 0;
                let res = memory.push(step, overwrite);
                if res.is_err() {
                    assert!(!overwrite);
                    assert!(memory.is_full());
                }
            }
            3 => {
                let was_empty = memory.is_empty();
                assert_eq!(memory.pop().is_err(), was_empty);
            }
            _ => {
                let k = step % (capacity + 2);
                let res = memory.sample_batch(k);
                if k <= memory.used() {
                    let batch = res.unwrap();
                    assert_eq!(batch.len(), k);
                    assert!(batch.iter().all(|x| memory.as_slice().contains(x)));
                } else {
                    assert!(matches!(res, Err(MemoryError::SampleSizeExceeded { .. })));
                }
            }
        }
        assert!(memory.used() <= capacity);
        assert!(memory.position() < capacity);
        assert_eq!(memory.used() + memory.available(), capacity);
    }
}

#[test]
fn test_sample_batch_is_without_replacement() {
    init();

    let config = ReplayMemoryConfig::default().capacity(32).seed(5);
    let mut memory = ReplayMemory::from_iter_with_config(0..32, &config).unwrap();

    for k in 0..=32 {
        let batch = memory.sample_batch(k).unwrap();
        assert_eq!(batch.len(), k);
        assert_eq!(batch.iter().collect::<HashSet<_>>().len(), k);
        assert!(batch.iter().all(|&x| x < 32));
    }
}

#[test]
fn test_sampling_is_reproducible() {
    init();

    let sample = |seed: u64| {
        let config = ReplayMemoryConfig::default().capacity(100).seed(seed);
        let mut memory = ReplayMemory::from_iter_with_config(0..100, &config).unwrap();
        let one = (0..10)
            .map(|_| memory.sample_one().unwrap())
            .collect::<Vec<_>>();
        let batch = memory.sample_batch(10).unwrap();
        (one, batch)
    };

    assert_eq!(sample(3), sample(3));
}

#[test]
fn test_sample_one_is_roughly_uniform() {
    init();

    let config = ReplayMemoryConfig::default().capacity(4).seed(9);
    let mut memory = ReplayMemory::from_sequence(vec![0usize, 1, 2, 3], &config).unwrap();
    let mut counts = [0usize; 4];
    for _ in 0..4000 {
        counts[memory.sample_one().unwrap()] += 1;
    }
    assert!(counts.iter().all(|&c| c > 850 && c < 1150));
}
