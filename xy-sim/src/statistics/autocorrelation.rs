/// Streaming autocorrelation accumulator using a ring buffer.
///
/// Computes the normalized autocorrelation function Γ(δ) of a scalar time
/// series without storing the full history. Memory is O(max_lag).
pub struct AutocorrAccum {
    max_lag: usize,
    /// The last `max_lag + 1` values, newest at `ring_pos - 1`.
    ring: Vec<f64>,
    sum_o: f64,
    sum_o2: f64,
    /// Running sum of o(t)·o(t−δ) for δ = 0..=max_lag.
    sum_prod: Vec<f64>,
    n_recorded: usize,
    ring_pos: usize,
}

impl AutocorrAccum {
    pub fn new(max_lag: usize) -> Self {
        Self {
            max_lag,
            ring: vec![0.0; max_lag + 1],
            sum_o: 0.0,
            sum_o2: 0.0,
            sum_prod: vec![0.0; max_lag + 1],
            n_recorded: 0,
            ring_pos: 0,
        }
    }

    pub fn push(&mut self, o: f64) {
        let len = self.ring.len();
        let pos = self.ring_pos;
        self.ring[pos] = o;
        self.sum_o += o;
        self.sum_o2 += o * o;

        let n_back = self.n_recorded.min(self.max_lag);
        for delta in 0..=n_back {
            let idx = (pos + len - delta) % len;
            self.sum_prod[delta] += o * self.ring[idx];
        }
        self.n_recorded += 1;
        self.ring_pos = (pos + 1) % len;
    }

    pub fn len(&self) -> usize {
        self.n_recorded
    }

    pub fn is_empty(&self) -> bool {
        self.n_recorded == 0
    }

    /// Γ(δ) for δ = 0..=max_lag. A zero-variance series gives `[1, 0, 0, ...]`.
    pub fn finish(&self) -> Vec<f64> {
        let m = self.n_recorded as f64;
        let mean = self.sum_o / m;
        let var = self.sum_o2 / m - mean * mean;
        (0..=self.max_lag)
            .map(|delta| {
                let count = self.n_recorded.saturating_sub(delta) as f64;
                if count <= 0.0 || !(var > 0.0) {
                    return if delta == 0 { 1.0 } else { 0.0 };
                }
                (self.sum_prod[delta] / count - mean * mean) / var
            })
            .collect()
    }
}

/// Integrated autocorrelation time with Sokal's automatic window `W ≥ 5τ`.
pub fn sokal_tau(gamma: &[f64]) -> f64 {
    let mut tau = 0.5;
    for (w, &g) in gamma.iter().enumerate().skip(1) {
        tau += g;
        if w as f64 >= 5.0 * tau {
            return tau;
        }
    }
    tau
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_small_series() {
        // 1, 2, 3, 4: mean 2.5, var 1.25
        let mut acc = AutocorrAccum::new(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            acc.push(v);
        }
        assert_eq!(acc.len(), 4);
        let g = acc.finish();
        assert_relative_eq!(g[0], 1.0, epsilon = 1e-12);
        // (2·1 + 3·2 + 4·3) / 3 = 20/3
        assert_relative_eq!(g[1], (20.0 / 3.0 - 6.25) / 1.25, epsilon = 1e-12);
        // (3·1 + 4·2) / 2 = 5.5
        assert_relative_eq!(g[2], (5.5 - 6.25) / 1.25, epsilon = 1e-12);
        // lag 3 pairs only 4 with 1
        assert_relative_eq!(g[3], (4.0 - 6.25) / 1.25, epsilon = 1e-12);
    }

    #[test]
    fn test_ring_wraps() {
        // Longer than the ring: compare against a direct computation.
        let series: Vec<f64> = (0..50).map(|t| ((t * 7919) % 13) as f64).collect();
        let max_lag = 4;
        let mut acc = AutocorrAccum::new(max_lag);
        for &v in &series {
            acc.push(v);
        }
        let g = acc.finish();

        let n = series.len() as f64;
        let mean = series.iter().sum::<f64>() / n;
        let var = series.iter().map(|v| v * v).sum::<f64>() / n - mean * mean;
        for delta in 0..=max_lag {
            let k = series.len() - delta;
            let prod: f64 = (0..k).map(|t| series[t] * series[t + delta]).sum::<f64>() / k as f64;
            assert_relative_eq!(g[delta], (prod - mean * mean) / var, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_constant_series() {
        let mut acc = AutocorrAccum::new(3);
        for _ in 0..10 {
            acc.push(0.5);
        }
        let g = acc.finish();
        assert_eq!(g[0], 1.0);
        assert!(g[1..].iter().all(|&x| x == 0.0));
        assert_eq!(sokal_tau(&g), 0.5);
    }

    #[test]
    fn test_sokal_tau_window() {
        // Γ = 1, 0.5, 0.25, ...: tau grows to 1.5 and the window closes at w = 8
        let gamma: Vec<f64> = (0..20).map(|k| 0.5f64.powi(k)).collect();
        let tau = sokal_tau(&gamma);
        assert!(tau > 1.4 && tau < 1.5);
    }
}
