/// Weighted rank centrality with damping.
///
/// Builds a dense weighted win matrix, turns it into a column-stochastic
/// "loses-to" transition matrix, and runs damped power iteration from the
/// uniform vector. Internal module: operates on pre-mapped `usize` indices,
/// not caller IDs.
use crate::types::IndexedMatchup;

pub struct RankCentrality {
    num_items: usize,
    /// Column-stochastic transition matrix: `transition[i][j]` is the share of
    /// item j's loss weight that went to item i.
    transition: Vec<Vec<f64>>,
    damping: f64,
    /// Current score vector, sums to ~1.
    pub scores: Vec<f64>,
}

impl RankCentrality {
    pub fn new(num_items: usize, results: &[IndexedMatchup], damping: f64) -> Self {
        // W[i][j] = total weight of matchups where i beat j
        let mut wins = vec![vec![0.0_f64; num_items]; num_items];
        for &(winner, loser, weight) in results {
            assert!(winner < num_items, "winner index {} out of range (num_items = {})", winner, num_items);
            assert!(loser < num_items, "loser index {} out of range (num_items = {})", loser, num_items);
            wins[winner][loser] += weight;
        }

        let uniform = if num_items > 0 { 1.0 / num_items as f64 } else { 0.0 };
        let mut transition = vec![vec![0.0_f64; num_items]; num_items];

        for j in 0..num_items {
            let mut total_loss_weight = 0.0;
            for row in &wins {
                total_loss_weight += row[j];
            }

            // An item that never lost would be a rank sink; spread its column evenly.
            if total_loss_weight > 0.0 {
                for i in 0..num_items {
                    transition[i][j] = wins[i][j] / total_loss_weight;
                }
            } else {
                for row in transition.iter_mut() {
                    row[j] = uniform;
                }
            }
        }

        RankCentrality {
            num_items,
            transition,
            damping,
            scores: vec![uniform; num_items],
        }
    }

    /// One damped power-iteration step.
    fn run_iteration(&mut self) {
        let n = self.num_items;
        let mut next = vec![0.0_f64; n];

        for (i, row) in self.transition.iter().enumerate() {
            let mut sum = 0.0;
            for j in 0..n {
                sum += self.scores[j] * row[j];
            }
            next[i] = sum;
        }

        let mut norm: f64 = next.iter().sum();
        if norm == 0.0 {
            norm = 1.0;
        }

        let teleport = (1.0 - self.damping) / n as f64;
        for i in 0..n {
            self.scores[i] = self.damping * (next[i] / norm) + teleport;
        }
    }

    /// Run exactly `iterations` steps. No early stopping: identical input
    /// always yields identical output.
    pub fn calculate_scores(&mut self, iterations: usize) {
        if self.num_items == 0 {
            return;
        }
        for _ in 0..iterations {
            self.run_iteration();
        }
    }

    pub fn get_score(&self, item: usize) -> f64 {
        self.scores[item]
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    #[cfg(test)]
    fn column_sum(&self, j: usize) -> f64 {
        self.transition.iter().map(|row| row[j]).sum()
    }
}
