use rand::Rng;

/// Weighted boolean decision point: one hot slot against `odds_one_to_many`
/// cold slots, picked uniformly, so the true-rate is `1 / (odds + 1)`.
///
/// The pool semantics matter: chained gates must consume one draw each and
/// keep their joint distribution exact, which an independent Bernoulli per
/// branch would not.
pub fn gate<R: Rng>(rng: &mut R, odds_one_to_many: u32) -> bool {
    rng.random_range(0..=odds_one_to_many) == 0
}

/// Ordered weighted pick with a guaranteed fallback.
///
/// Entries are tried front to back, each consuming exactly one [`gate`] call
/// with its weight; the fallback is selected once every gate misses. This is
/// the one place the recurring pick-or-fall-through pattern (weather,
/// payment method, fleet owner) is implemented, so its selection semantics
/// stay auditable.
pub fn choose<'a, T, R: Rng>(rng: &mut R, entries: &'a [(u32, T)], fallback: &'a T) -> &'a T {
    for (weight, value) in entries {
        if gate(rng, *weight) {
            return value;
        }
    }
    fallback
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const DRAWS: u32 = 20_000;

    fn observed_rate(odds: u32, seed: u64) -> f64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let hits = (0..DRAWS).filter(|_| gate(&mut rng, odds)).count();
        hits as f64 / DRAWS as f64
    }

    #[test]
    fn zero_odds_always_fires() {
        let mut rng = StdRng::seed_from_u64(11);
        assert!((0..100).all(|_| gate(&mut rng, 0)));
    }

    #[test]
    fn true_rate_tracks_one_over_odds_plus_one() {
        for (odds, seed) in [(2u32, 5u64), (4, 6), (10, 7)] {
            let expected = 1.0 / f64::from(odds + 1);
            let observed = observed_rate(odds, seed);
            assert!(
                (observed - expected).abs() < 0.02,
                "gate({odds}): observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn choose_returns_fallback_without_entries() {
        let mut rng = StdRng::seed_from_u64(13);
        let entries: [(u32, &str); 0] = [];
        assert_eq!(*choose(&mut rng, &entries, &"fallback"), "fallback");
    }

    #[test]
    fn choose_matches_chained_gate_frequencies() {
        // With weights 4, 3, 3 the chain yields 1/5, 4/5 * 1/4, 4/5 * 3/4 * 1/4
        // and 9/20 for the fallback.
        let entries = [(4u32, "visa"), (3, "mastercard"), (3, "google-pay")];
        let fallback = "apple-pay";
        let mut rng = StdRng::seed_from_u64(17);

        let mut counts = std::collections::HashMap::new();
        for _ in 0..DRAWS {
            *counts.entry(*choose(&mut rng, &entries, &fallback)).or_insert(0u32) += 1;
        }

        let rate = |key: &str| f64::from(counts[key]) / f64::from(DRAWS);
        assert!((rate("visa") - 0.20).abs() < 0.02);
        assert!((rate("mastercard") - 0.20).abs() < 0.02);
        assert!((rate("google-pay") - 0.15).abs() < 0.02);
        assert!((rate("apple-pay") - 0.45).abs() < 0.02);
    }
}
