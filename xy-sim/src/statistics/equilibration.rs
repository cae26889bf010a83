use serde::Serialize;

/// Running average of the correlation after `step` updates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquilCheckpoint {
    pub step: usize,
    pub correlation_avg: f64,
}

/// Snapshots the running average of a per-step observable at log-spaced
/// checkpoints (128, 256, 512, ... and the final step).
///
/// A run is plausibly equilibrated once consecutive checkpoints agree.
pub struct EquilDiagnosticAccum {
    checkpoints: Vec<usize>,
    next_ckpt_idx: usize,
    count: usize,
    sum_correlation: f64,
    snapshots: Vec<EquilCheckpoint>,
}

impl EquilDiagnosticAccum {
    pub fn new(n_steps: usize) -> Self {
        let mut checkpoints = Vec::new();
        let mut p = 128usize;
        while p < n_steps {
            checkpoints.push(p);
            p *= 2;
        }
        if checkpoints.last() != Some(&n_steps) {
            checkpoints.push(n_steps);
        }

        Self {
            checkpoints,
            next_ckpt_idx: 0,
            count: 0,
            sum_correlation: 0.0,
            snapshots: Vec::new(),
        }
    }

    pub fn push(&mut self, correlation: f64) {
        self.count += 1;
        self.sum_correlation += correlation;

        if self.next_ckpt_idx < self.checkpoints.len()
            && self.count == self.checkpoints[self.next_ckpt_idx]
        {
            self.snapshots.push(EquilCheckpoint {
                step: self.count,
                correlation_avg: self.sum_correlation / self.count as f64,
            });
            self.next_ckpt_idx += 1;
        }
    }

    pub fn finish(self) -> Vec<EquilCheckpoint> {
        self.snapshots
    }
}
