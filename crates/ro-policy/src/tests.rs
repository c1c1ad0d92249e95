//! Unit tests for ro-policy.

use std::sync::Arc;

use ro_core::{Action, ActionSpace, GeneratorHandle};

use crate::{
    Approximator, CategoricalPolicy, DirectPolicy, GaussianPolicy, Policy, PolicyError,
    PolicyKind, SharedParams, SoftmaxPolicy, softmax,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Approximator whose output is the current parameter vector, whatever the state.
struct Echo {
    params: SharedParams,
}

impl Echo {
    fn new(values: Vec<f64>) -> Arc<Self> {
        Arc::new(Self { params: SharedParams::new(values) })
    }
}

impl Approximator for Echo {
    type State = ();

    fn predict(&self, _: &()) -> Vec<f64> {
        self.params.snapshot().to_vec()
    }

    fn parameters(&self) -> &SharedParams {
        &self.params
    }
}

fn rng() -> GeneratorHandle {
    GeneratorHandle::from_seed(17)
}

// ── SharedParams ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod params {
    use super::*;

    #[test]
    fn publish_bumps_version_and_replaces_snapshot() {
        let p = SharedParams::new(vec![1.0, 2.0]);
        assert_eq!(p.version(), 0);
        let before = p.snapshot();

        p.publish(vec![3.0]);
        assert_eq!(p.version(), 1);
        assert_eq!(&*p.snapshot(), &[3.0]);
        // Readers holding an old snapshot keep it intact.
        assert_eq!(&*before, &[1.0, 2.0]);
    }

    #[test]
    fn clones_share_one_cell() {
        let a = SharedParams::new(vec![0.0]);
        let b = a.clone();
        assert!(a.shares_with(&b));
        b.publish(vec![5.0]);
        assert_eq!(&*a.snapshot(), &[5.0]);
        assert!(!a.shares_with(&SharedParams::empty()));
    }

    #[test]
    fn empty_and_len() {
        assert!(SharedParams::empty().is_empty());
        assert_eq!(SharedParams::default().len(), 0);
        assert_eq!(SharedParams::new(vec![0.0; 4]).len(), 4);
    }

    #[test]
    fn concurrent_readers_see_whole_vectors() {
        let p = SharedParams::new(vec![0.0; 8]);
        std::thread::scope(|s| {
            for _ in 0..4 {
                let p = p.clone();
                s.spawn(move || {
                    for _ in 0..500 {
                        let snap = p.snapshot();
                        assert!(snap.iter().all(|&v| v == snap[0]));
                    }
                });
            }
            for i in 1..=100 {
                p.publish(vec![i as f64; 8]);
            }
        });
        assert_eq!(p.version(), 100);
    }
}

// ── DirectPolicy ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod direct {
    use super::*;

    #[test]
    fn picks_argmax_of_one_hot() {
        let mut out = vec![0.0; 1000];
        out[50] = 1.0;
        let space = ActionSpace::discrete_uniform(1, 1000).unwrap();
        let policy = DirectPolicy::new(Echo::new(out), space);
        let mut rng = rng();
        for _ in 0..10 {
            assert_eq!(policy.sample(&(), &mut rng), Action::Discrete(vec![50]));
        }
    }

    #[test]
    fn argmax_per_segment_for_multi_var() {
        // Variable 0 has 2 actions, variable 1 has 3.
        let space = ActionSpace::discrete_variable(vec![2, 3]).unwrap();
        let policy = DirectPolicy::new(Echo::new(vec![0.1, 0.9, 0.3, 0.2, 0.5]), space);
        assert_eq!(policy.sample(&(), &mut rng()), Action::Discrete(vec![1, 2]));
    }

    #[test]
    fn ties_pick_lowest_index_and_short_output_defaults_to_zero() {
        let space = ActionSpace::discrete_uniform(2, 3).unwrap();
        let policy = DirectPolicy::new(Echo::new(vec![1.0, 1.0, 0.0]), space);
        assert_eq!(policy.sample(&(), &mut rng()), Action::Discrete(vec![0, 0]));
    }

    #[test]
    fn continuous_outputs_are_clamped() {
        let space = ActionSpace::continuous_from_bounds(&[(-1.0, 1.0), (0.0, 10.0)]).unwrap();
        let policy = DirectPolicy::new(Echo::new(vec![-5.0, 3.5]), space.clone());
        let action = policy.sample(&(), &mut rng());
        assert!(space.contains(&action));
        assert_eq!(action.as_continuous().unwrap(), &[-1.0, 3.5]);
    }

    #[test]
    fn reads_freshly_published_parameters() {
        let approx = Echo::new(vec![1.0, 0.0]);
        let space = ActionSpace::discrete_uniform(1, 2).unwrap();
        let policy = DirectPolicy::new(Arc::clone(&approx), space);
        assert_eq!(policy.sample(&(), &mut rng()), Action::Discrete(vec![0]));

        approx.parameters().publish(vec![0.0, 1.0]);
        assert_eq!(policy.sample(&(), &mut rng()), Action::Discrete(vec![1]));
        assert!(policy.parameters().shares_with(approx.parameters()));
    }
}

// ── Categorical / Softmax ─────────────────────────────────────────────────────

#[cfg(test)]
mod stochastic {
    use super::*;

    #[test]
    fn categorical_never_picks_zero_weight() {
        let space = ActionSpace::discrete_uniform(1, 4).unwrap();
        let policy = CategoricalPolicy::new(Echo::new(vec![0.0, 3.0, 0.0, 1.0]), space).unwrap();
        let mut rng = rng();
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            let a = policy.sample(&(), &mut rng);
            counts[a.as_discrete().unwrap()[0]] += 1;
        }
        assert_eq!(counts[0], 0);
        assert_eq!(counts[2], 0);
        // Expected 3000 / 1000; generous band.
        assert!((2700..=3300).contains(&counts[1]), "counts = {counts:?}");
    }

    #[test]
    fn categorical_falls_back_to_uniform_on_zero_weights() {
        let space = ActionSpace::discrete_uniform(1, 3).unwrap();
        let policy = CategoricalPolicy::new(Echo::new(vec![0.0; 3]), space.clone()).unwrap();
        let mut rng = rng();
        let mut seen = [false; 3];
        for _ in 0..300 {
            let a = policy.sample(&(), &mut rng);
            assert!(space.contains(&a));
            seen[a.as_discrete().unwrap()[0]] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn categorical_rejects_multi_var_and_continuous() {
        let multi = ActionSpace::discrete_uniform(2, 3).unwrap();
        assert!(matches!(
            CategoricalPolicy::new(Echo::new(vec![]), multi),
            Err(PolicyError::IncompatibleSpace { .. })
        ));
        let cont = ActionSpace::continuous_uniform(1, 0.0, 1.0).unwrap();
        assert!(SoftmaxPolicy::new(Echo::new(vec![]), cont).is_err());
    }

    #[test]
    fn softmax_is_normalised_and_stable() {
        let p = softmax(&[1000.0, 1000.0]);
        assert!((p[0] - 0.5).abs() < 1e-12);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn softmax_policy_prefers_high_logit() {
        let space = ActionSpace::discrete_uniform(1, 3).unwrap();
        let policy = SoftmaxPolicy::new(Echo::new(vec![0.0, 10.0, 0.0]), space).unwrap();
        let mut rng = rng();
        let hits = (0..1000)
            .filter(|_| policy.sample(&(), &mut rng) == Action::Discrete(vec![1]))
            .count();
        assert!(hits > 990, "hits = {hits}");
    }
}

// ── GaussianPolicy ────────────────────────────────────────────────────────────

#[cfg(test)]
mod gaussian {
    use super::*;

    #[test]
    fn samples_centre_on_mean_and_stay_in_bounds() {
        let space = ActionSpace::continuous_uniform(1, -10.0, 10.0).unwrap();
        let policy = GaussianPolicy::new(Echo::new(vec![2.0]), space.clone(), 0.5).unwrap();
        let mut rng = rng();
        let n = 2000;
        let mut sum = 0.0;
        for _ in 0..n {
            let a = policy.sample(&(), &mut rng);
            assert!(space.contains(&a));
            sum += a.as_continuous().unwrap()[0];
        }
        // Standard error is 0.5 / sqrt(2000) ≈ 0.011.
        assert!((sum / n as f64 - 2.0).abs() < 0.06);
    }

    #[test]
    fn missing_mean_uses_midpoint() {
        let space = ActionSpace::continuous_uniform(1, 4.0, 6.0).unwrap();
        let policy = GaussianPolicy::new(Echo::new(vec![]), space, 1e-9).unwrap();
        let v = policy.sample(&(), &mut rng()).as_continuous().unwrap()[0];
        assert!((v - 5.0).abs() < 1e-6);
    }

    #[test]
    fn keeps_configured_std() {
        let space = ActionSpace::continuous_uniform(2, 0.0, 1.0).unwrap();
        let policy = GaussianPolicy::new(Echo::new(vec![0.5, 0.5]), space, 0.25).unwrap();
        assert_eq!(policy.std(), 0.25);
    }

    #[test]
    fn rejects_bad_std_and_discrete_space() {
        let cont = ActionSpace::continuous_uniform(1, 0.0, 1.0).unwrap();
        for std in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                GaussianPolicy::new(Echo::new(vec![]), cont.clone(), std),
                Err(PolicyError::Config(_))
            ));
        }
        let disc = ActionSpace::discrete_uniform(1, 2).unwrap();
        assert!(matches!(
            GaussianPolicy::new(Echo::new(vec![]), disc, 1.0),
            Err(PolicyError::IncompatibleSpace { .. })
        ));
    }
}

// ── PolicyKind ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod kind {
    use super::*;

    #[test]
    fn builds_each_kind_for_a_compatible_space() {
        let disc = ActionSpace::discrete_uniform(1, 3).unwrap();
        let cont = ActionSpace::continuous_uniform(2, 0.0, 1.0).unwrap();
        let approx = Echo::new(vec![0.2, 0.5, 0.3]);

        for kind in [PolicyKind::Direct, PolicyKind::Categorical, PolicyKind::Softmax] {
            let policy = kind.build(Arc::clone(&approx), disc.clone()).unwrap();
            assert!(disc.contains(&policy.sample(&(), &mut rng())), "{}", kind.name());
        }
        let policy = PolicyKind::Gaussian { std: 0.1 }.build(approx, cont.clone()).unwrap();
        assert!(cont.contains(&policy.sample(&(), &mut rng())));
    }

    #[test]
    fn propagates_incompatibility() {
        let cont = ActionSpace::continuous_uniform(1, 0.0, 1.0).unwrap();
        assert!(PolicyKind::Softmax.build(Echo::new(vec![]), cont).is_err());
    }

    #[test]
    fn boxed_policy_forwards() {
        let space = ActionSpace::discrete_uniform(1, 2).unwrap();
        let boxed: Box<dyn Policy<State = ()>> =
            Box::new(DirectPolicy::new(Echo::new(vec![0.0, 1.0]), space.clone()));
        assert_eq!(boxed.action_space(), &space);
        assert_eq!(boxed.sample(&(), &mut rng()), Action::Discrete(vec![1]));
    }
}
