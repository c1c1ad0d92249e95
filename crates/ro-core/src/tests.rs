//! Unit tests for ro-core primitives.

#[cfg(test)]
mod ids {
    use crate::WorkerId;

    #[test]
    fn index_roundtrip() {
        let id = WorkerId(7);
        assert_eq!(id.index(), 7);
        assert_eq!(WorkerId::try_from(7usize).unwrap(), id);
    }

    #[test]
    fn display_and_thread_name() {
        assert_eq!(WorkerId(3).to_string(), "worker#3");
        assert_eq!(WorkerId(3).thread_name(), "rollout-worker-3");
    }
}

#[cfg(test)]
mod rng {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::{GeneratorHandle, RandomEngine, SeedRegistry, seed_lineage};

    fn draws(handle: &mut GeneratorHandle, n: usize) -> Vec<f64> {
        (0..n).map(|_| handle.uniform()).collect()
    }

    #[test]
    fn seeded_handle_matches_manual_derivation() {
        let registry = SeedRegistry::new();
        registry.set_seed(2);

        let mut deriver = ChaCha8Rng::seed_from_u64(2);
        let mut expected = ChaCha8Rng::seed_from_u64(deriver.next_u64());

        let mut handle = registry.get_generator().unwrap();
        for _ in 0..5 {
            assert_eq!(handle.next_u64(), expected.next_u64());
        }
    }

    #[test]
    fn two_sequential_generators_distinct_but_reproducible() {
        let run = || {
            let registry = SeedRegistry::seeded(2);
            let mut a = registry.get_generator().unwrap();
            let mut b = registry.get_generator().unwrap();
            (draws(&mut a, 1000), draws(&mut b, 1000))
        };
        let (a1, b1) = run();
        let (a2, b2) = run();
        assert_ne!(a1, b1, "sibling generators must not share a stream");
        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
    }

    #[test]
    fn handle_seeds_follow_lineage() {
        let registry = SeedRegistry::seeded(99);
        let seeds: Vec<u64> = (0..10).map(|_| registry.get_generator().unwrap().seed()).collect();
        let expected: Vec<u64> = seed_lineage(99).take(10).collect();
        assert_eq!(seeds, expected);
        assert_eq!(registry.issued(), 10);
    }

    #[test]
    fn set_seed_resets_lineage() {
        let registry = SeedRegistry::seeded(5);
        let first = registry.get_generator().unwrap().seed();
        registry.get_generator().unwrap();
        registry.set_seed(5);
        assert_eq!(registry.issued(), 0);
        assert_eq!(registry.get_generator().unwrap().seed(), first);
        assert_eq!(registry.base_seed(), Some(5));
    }

    #[test]
    fn unseeded_registry_uses_entropy() {
        let registry = SeedRegistry::new();
        assert_eq!(registry.base_seed(), None);
        let mut handle = registry.get_generator().unwrap();
        let values: HashSet<u64> = (0..100).map(|_| handle.next_u64()).collect();
        assert!(values.len() > 1);
        assert_eq!(registry.issued(), 0);
    }

    #[test]
    fn concurrent_callers_get_no_repeats_and_no_gaps() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 50;

        let registry = Arc::new(SeedRegistry::seeded(1234));
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    (0..PER_THREAD)
                        .map(|_| registry.get_generator().unwrap().seed())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let issued: HashSet<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let expected: HashSet<u64> = seed_lineage(1234).take(THREADS * PER_THREAD).collect();
        assert_eq!(issued, expected);
    }

    #[test]
    fn fill_uniform_matches_single_draws() {
        let mut a = GeneratorHandle::from_seed(17);
        let mut b = GeneratorHandle::from_seed(17);
        let mut batch = [0.0; 64];
        a.fill_uniform(&mut batch);
        assert_eq!(batch.to_vec(), draws(&mut b, 64));
        assert!(batch.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn gen_range_is_inherent_and_matches_rng_stream() {
        let mut a = GeneratorHandle::from_seed(21);
        let mut b = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..100 {
            let x: usize = a.gen_range(0..10);
            assert_eq!(x, rand::Rng::gen_range(&mut b, 0..10));
            assert!(x < 10);
        }
        let y = a.gen_range(-2.0..=2.0);
        assert!((-2.0..=2.0).contains(&y));
    }

    // The only test that touches the process-wide registry.
    #[test]
    fn global_engine_is_reproducible() {
        RandomEngine::set_seed(2);
        let first = RandomEngine::get_generator().unwrap().seed();
        RandomEngine::set_seed(2);
        assert_eq!(RandomEngine::get_generator().unwrap().seed(), first);
        assert_eq!(RandomEngine::registry().base_seed(), Some(2));
    }
}

#[cfg(test)]
mod space {
    use proptest::prelude::*;

    use crate::{Action, ActionSpace, CoreError, GeneratorHandle, sample_random};

    fn is_config_err<T: std::fmt::Debug>(r: Result<T, CoreError>) -> bool {
        matches!(r, Err(CoreError::Config(_)))
    }

    #[test]
    fn rejects_malformed_spaces() {
        assert!(is_config_err(ActionSpace::discrete_uniform(0, 4)));
        assert!(is_config_err(ActionSpace::discrete_uniform(2, 0)));
        assert!(is_config_err(ActionSpace::discrete_variable(vec![])));
        assert!(is_config_err(ActionSpace::discrete_variable(vec![3, 0, 2])));
        assert!(is_config_err(ActionSpace::continuous_uniform(2, 1.0, 1.0)));
        assert!(is_config_err(ActionSpace::continuous_uniform(2, 2.0, -1.0)));
        assert!(is_config_err(ActionSpace::continuous_uniform(1, f64::NEG_INFINITY, 0.0)));
        assert!(is_config_err(ActionSpace::continuous_variable(vec![0.0, 0.0], vec![1.0])));
        assert!(is_config_err(ActionSpace::continuous_from_bounds(&[(0.0, 1.0), (3.0, 2.0)])));
        assert!(is_config_err(ActionSpace::continuous_uniform(1, -f64::MAX, f64::MAX)));
    }

    #[test]
    fn queries() {
        let d = ActionSpace::discrete_variable(vec![2, 3, 4]).unwrap();
        assert_eq!(d.n_vars(), 3);
        assert!(d.is_discrete());
        assert_eq!(d.cardinality(), Some(24));
        assert_eq!(d.action_count(1), Some(3));
        assert_eq!(d.bounds(0), None);

        let c = ActionSpace::continuous_uniform(2, -1.0, 1.0).unwrap();
        assert!(!c.is_discrete());
        assert_eq!(c.cardinality(), None);
        assert_eq!(c.bounds(1), Some((-1.0, 1.0)));
        assert_eq!(c.bounds(2), None);
    }

    #[test]
    fn cardinality_overflow_is_none() {
        let d = ActionSpace::discrete_uniform(64, 1 << 20).unwrap();
        assert_eq!(d.cardinality(), None);
    }

    #[test]
    fn contains_checks_kind_arity_and_range() {
        let d = ActionSpace::discrete_uniform(2, 5).unwrap();
        assert!(d.contains(&Action::Discrete(vec![0, 4])));
        assert!(!d.contains(&Action::Discrete(vec![0, 5])));
        assert!(!d.contains(&Action::Discrete(vec![1])));
        assert!(!d.contains(&Action::Continuous(vec![0.0, 1.0])));

        let c = ActionSpace::continuous_from_bounds(&[(0.0, 1.0), (-5.0, 5.0)]).unwrap();
        assert!(c.contains(&Action::Continuous(vec![0.0, 4.9])));
        assert!(!c.contains(&Action::Continuous(vec![1.0, 0.0])), "upper bound is exclusive");
    }

    #[test]
    fn discrete_uniform_covers_every_value() {
        let space = ActionSpace::discrete_uniform(1, 6).unwrap();
        let mut rng = GeneratorHandle::from_seed(3);
        let mut seen = [false; 6];
        for _ in 0..600 {
            let a = sample_random(&space, &mut rng);
            seen[a.as_discrete().unwrap()[0]] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn sampling_is_reproducible() {
        let space = ActionSpace::continuous_uniform(4, -2.0, 2.0).unwrap();
        let mut a = GeneratorHandle::from_seed(8);
        let mut b = GeneratorHandle::from_seed(8);
        for _ in 0..20 {
            assert_eq!(sample_random(&space, &mut a), sample_random(&space, &mut b));
        }
    }

    #[test]
    fn clamp_pulls_values_into_domain() {
        let d = ActionSpace::discrete_variable(vec![3, 2]).unwrap();
        assert_eq!(d.clamp(Action::Discrete(vec![9, 1])), Action::Discrete(vec![2, 1]));

        let c = ActionSpace::continuous_uniform(3, 0.0, 1.0).unwrap();
        let clamped = c.clamp(Action::Continuous(vec![-4.0, 0.25, 7.0]));
        assert!(c.contains(&clamped));
        let values = clamped.as_continuous().unwrap();
        assert_eq!(&values[..2], &[0.0, 0.25]);
        assert!(values[2] < 1.0 && values[2] > 0.999);
    }

    fn any_space() -> impl Strategy<Value = ActionSpace> {
        prop_oneof![
            (1usize..8, 1usize..50)
                .prop_map(|(v, n)| ActionSpace::discrete_uniform(v, n).unwrap()),
            prop::collection::vec(1usize..50, 1..8)
                .prop_map(|counts| ActionSpace::discrete_variable(counts).unwrap()),
            (1usize..8, -100.0f64..100.0, 0.001f64..50.0)
                .prop_map(|(v, lo, w)| ActionSpace::continuous_uniform(v, lo, lo + w).unwrap()),
            prop::collection::vec((-100.0f64..100.0, 0.001f64..50.0), 1..8).prop_map(|pairs| {
                let bounds: Vec<(f64, f64)> = pairs.into_iter().map(|(lo, w)| (lo, lo + w)).collect();
                ActionSpace::continuous_from_bounds(&bounds).unwrap()
            }),
        ]
    }

    proptest! {
        #[test]
        fn samples_stay_within_bounds(space in any_space(), seed in any::<u64>()) {
            let mut rng = GeneratorHandle::from_seed(seed);
            for _ in 0..50 {
                let action = sample_random(&space, &mut rng);
                prop_assert_eq!(action.len(), space.n_vars());
                prop_assert!(space.contains(&action));
            }
        }
    }
}
