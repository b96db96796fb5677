use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use itertools::Itertools;

/// Check that `sampler` only returns values from `expected`, and returns each of them about equally often.
/// An empty `expected` means the sampler should never return anything.
pub fn test_sampler_uniform<T: Eq + Hash + Debug + Copy>(expected: &[T], mut sampler: impl FnMut() -> Option<T>) {
    // expected is not a set so failures are reported in a reasonable order
    assert!(
        expected.iter().all_unique(),
        "Got duplicate value in expected: {:?}",
        expected
    );

    if expected.is_empty() {
        for _ in 0..100 {
            assert_eq!(None, sampler());
        }
        return;
    }

    let samples_per_value = 1000;
    let total_samples = samples_per_value * expected.len();

    let mut counts: HashMap<T, u64> = expected.iter().map(|&value| (value, 0)).collect();
    for _ in 0..total_samples {
        let sample = sampler().expect("there are expected values, so the sampler must return one");
        match counts.get_mut(&sample) {
            None => panic!("Non-expected value {:?} was sampled", sample),
            Some(count) => *count += 1,
        }
    }

    for value in expected {
        let count = counts[value];
        let relative = count as f32 / samples_per_value as f32;

        println!("  value {:?} sampled {} ~ {}", value, count, relative);
        assert!(
            (0.8..1.2).contains(&relative),
            "Value {:?} was over/under sampled {} ~ {}",
            value,
            count,
            relative,
        );
    }
}
