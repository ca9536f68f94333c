//! Non-repeating random selection over static pools.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Pick a pool entry whose identity has not been served yet.
///
/// Candidates are the entries passing `filter` whose identity is absent from
/// `used`. When every candidate has been served, the used list is cleared and
/// the whole pool becomes eligible again (the filter is not reapplied on
/// reset, so an exhausted pool always yields something). The chosen identity
/// is recorded in `used`.
pub fn pick_unseen<'a, T, I, F>(
    pool: &'a [T],
    used: &mut Vec<String>,
    identity: I,
    filter: F,
    rng: &mut StdRng,
) -> Option<&'a T>
where
    I: Fn(&T) -> &str,
    F: Fn(&T) -> bool,
{
    let candidates: Vec<&T> = pool
        .iter()
        .filter(|item| filter(item) && !used.iter().any(|u| u == identity(item)))
        .collect();

    let chosen = if candidates.is_empty() {
        used.clear();
        pool.choose(rng)
    } else {
        candidates.choose(rng).copied()
    }?;

    used.push(identity(chosen).to_string());
    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn never_repeats_until_exhausted() {
        let pool = ["a", "b", "c"];
        let mut used = Vec::new();
        let mut rng = rng();

        let mut seen = Vec::new();
        for _ in 0..3 {
            let pick = pick_unseen(&pool, &mut used, |s| *s, |_| true, &mut rng).unwrap();
            seen.push(*pick);
        }
        seen.sort_unstable();
        assert_eq!(seen, ["a", "b", "c"]);
    }

    #[test]
    fn resets_after_exhaustion() {
        let pool = ["a", "b"];
        let mut used = vec!["a".to_string(), "b".to_string()];
        let mut rng = rng();

        let pick = pick_unseen(&pool, &mut used, |s| *s, |_| true, &mut rng);
        assert!(pick.is_some());
        assert_eq!(used.len(), 1);
    }

    #[test]
    fn filter_excludes_candidates() {
        let pool = ["squat clip", "jump clip"];
        let mut used = Vec::new();
        let mut rng = rng();

        let pick = pick_unseen(
            &pool,
            &mut used,
            |s| *s,
            |s| !s.contains("jump"),
            &mut rng,
        )
        .unwrap();
        assert_eq!(*pick, "squat clip");
    }

    #[test]
    fn empty_pool_yields_none() {
        let pool: [&str; 0] = [];
        let mut used = Vec::new();
        let mut rng = rng();
        assert!(pick_unseen(&pool, &mut used, |s| *s, |_| true, &mut rng).is_none());
    }
}
