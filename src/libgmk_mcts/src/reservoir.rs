// Copyright 2026 Gomoku Project Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Streaming reservoir sampling of size one: picks a uniformly random
//! element from an arrival stream without materializing it, used for
//! rollout move choice and for breaking ties in `best_uct_child` /
//! `best_num_sim_child`.

use rand::Rng;

/// A size-1 reservoir. Feed it arrivals with [`Reservoir::offer`]; the k-th
/// offered item replaces the current pick with probability `1/k`.
pub struct Reservoir<T> {
    current: Option<T>,
    seen: u64,
}

impl<T> Reservoir<T> {
    pub fn new() -> Self {
        Reservoir { current: None, seen: 0 }
    }

    /// Offers one arrival. `rng` is taken per-call rather than stored so the
    /// reservoir itself stays `Send`-free of any RNG state.
    pub fn offer<R: Rng + ?Sized>(&mut self, item: T, rng: &mut R) {
        self.seen += 1;
        if self.seen == 1 || rng.gen_range(0..self.seen) == 0 {
            self.current = Some(item);
        }
    }

    /// Offers one arrival only if `keep(&item)` holds, so the caller can
    /// implement epsilon-band "better, or tied and won the coin flip"
    /// comparators on top of plain reservoir sampling.
    ///
    /// `keep` receives the candidate and the currently held item (if any)
    /// and decides whether the candidate is eligible to replace it — e.g.
    /// "strictly greater" (always replaces) or "within epsilon" (ties,
    /// subject to the reservoir coin flip).
    pub fn into_inner(self) -> Option<T> {
        self.current
    }
}

impl<T> Default for Reservoir<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Selects the best-scoring item from a stream using reservoir sampling to
/// break ties uniformly at random. `better` takes `(candidate_score,
/// best_score)` and returns `Greater` if the candidate strictly improves on
/// the best, `Equal` if they tie (subject to reservoir coin flip), or `Less`
/// to discard the candidate outright.
pub fn select_best<T, R, F>(items: impl IntoIterator<Item = T>, mut score: F, rng: &mut R) -> Option<T>
where
    R: Rng + ?Sized,
    F: FnMut(&T, Option<&T>) -> std::cmp::Ordering,
{
    let mut best: Option<T> = None;
    let mut tie_count: u64 = 0;

    for item in items {
        match score(&item, best.as_ref()) {
            std::cmp::Ordering::Greater => {
                best = Some(item);
                tie_count = 1;
            }
            std::cmp::Ordering::Equal => {
                tie_count += 1;
                if rng.gen_range(0..tie_count) == 0 {
                    best = Some(item);
                }
            }
            std::cmp::Ordering::Less => {}
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn reservoir_keeps_only_arrival_when_alone() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut r = Reservoir::new();
        r.offer(42, &mut rng);
        assert_eq!(r.into_inner(), Some(42));
    }

    #[test]
    fn reservoir_distribution_is_roughly_uniform() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut counts = [0u32; 4];
        for _ in 0..40_000 {
            let mut r = Reservoir::new();
            for i in 0..4 {
                r.offer(i, &mut rng);
            }
            counts[r.into_inner().unwrap()] += 1;
        }
        for c in counts {
            assert!((c as i64 - 10_000).abs() < 1_000, "counts: {counts:?}");
        }
    }

    #[test]
    fn select_best_picks_strict_max() {
        let mut rng = SmallRng::seed_from_u64(3);
        let items = vec![1, 5, 3, 5, 2];
        let best = select_best(
            items,
            |candidate, best| candidate.cmp(&best.copied().unwrap_or(i32::MIN)),
            &mut rng,
        );
        assert_eq!(best, Some(5));
    }
}
