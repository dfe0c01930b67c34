use super::{Problem, ProblemStats};
use crate::error::AnnealResult;
use fastrand::Rng;

pub const DEFAULT_BINS: usize = 30;
pub const ITEMS_PER_BIN: usize = 6;

/// Load balancing: spread item weights across bins so the heaviest bin is
/// as light as possible.
///
/// The solution is the full bin assignment. Bin `i` starts with six items
/// of weight `i`, so the last bin is the heaviest.
#[derive(Debug)]
pub struct BinPacking {
    num_bins: usize,
    stats: ProblemStats,
}

impl Default for BinPacking {
    fn default() -> Self {
        Self::new(DEFAULT_BINS)
    }
}

impl BinPacking {
    pub fn new(num_bins: usize) -> Self {
        Self {
            num_bins,
            stats: ProblemStats::default(),
        }
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    pub fn bin_sums(bins: &[Vec<u32>]) -> Vec<u64> {
        bins.iter()
            .map(|bin| bin.iter().map(|&w| w as u64).sum())
            .collect()
    }
}

impl Problem for BinPacking {
    type Solution = Vec<Vec<u32>>;

    fn name(&self) -> &str {
        "BinPacking"
    }

    fn initial_solution(&self) -> Vec<Vec<u32>> {
        (0..self.num_bins)
            .map(|i| vec![i as u32; ITEMS_PER_BIN])
            .collect()
    }

    /// Swaps one random item of a random bin with one random item of
    /// another random bin (which may be the same bin).
    fn random_transition(&self, bins: &Vec<Vec<u32>>, rng: &mut Rng) -> Vec<Vec<u32>> {
        self.stats.record_transition();
        let mut next = bins.clone();
        if next.is_empty() {
            return next;
        }

        let bin1 = rng.usize(0..next.len());
        let bin2 = rng.usize(0..next.len());
        if next[bin1].is_empty() || next[bin2].is_empty() {
            return next;
        }
        let item1 = rng.usize(0..next[bin1].len());
        let item2 = rng.usize(0..next[bin2].len());

        next[bin1][item1] = bins[bin2][item2];
        next[bin2][item2] = bins[bin1][item1];
        next
    }

    fn solution_cost(&self, bins: &Vec<Vec<u32>>) -> AnnealResult<f64> {
        self.stats.record_cost();
        let heaviest = Self::bin_sums(bins).into_iter().max().unwrap_or(0) as f64;
        Ok((1.0 + heaviest) * (1.0 + heaviest))
    }

    /// Per-bin totals, for eyeballing a solution.
    fn describe(&self, bins: &Vec<Vec<u32>>) -> String {
        Self::bin_sums(bins)
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn stats(&self) -> &ProblemStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_cost_is_heaviest_bin_squared() {
        let p = BinPacking::new(5);
        let max_sum = 6.0 * 4.0;
        let cost = p.solution_cost(&p.initial_solution()).unwrap();
        assert_eq!(cost, (1.0 + max_sum) * (1.0 + max_sum));
    }

    #[test]
    fn test_transition_preserves_items() {
        let p = BinPacking::new(4);
        let mut rng = Rng::with_seed(3);
        let start = p.initial_solution();
        let next = p.random_transition(&start, &mut rng);

        let mut a: Vec<u32> = start.iter().flatten().copied().collect();
        let mut b: Vec<u32> = next.iter().flatten().copied().collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
        assert!(next.iter().all(|bin| bin.len() == ITEMS_PER_BIN));
        assert_eq!(start, p.initial_solution());
        assert_eq!(p.stats().transitions(), 1);
    }

    #[test]
    fn test_describe_lists_sums() {
        let bins = vec![vec![1, 2], vec![3, 3]];
        assert_eq!(BinPacking::new(2).describe(&bins), "3 6");
    }
}
