/// Running accumulator of `x^power` for a scalar observable.
#[derive(Debug, Clone)]
pub struct Statistics {
    pub count: usize,
    pub aggregate: f64,
    pub power: u32,
}

impl Statistics {
    pub fn new(power: u32) -> Self {
        Self {
            count: 0,
            aggregate: 0.0,
            power,
        }
    }

    pub fn update(&mut self, value: f64) {
        self.count += 1;
        self.aggregate += if self.power == 1 {
            value
        } else {
            value.powi(self.power as i32)
        };
    }

    /// Mean of the accumulated powers; `0.0` before the first update.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return self.aggregate;
        }
        self.aggregate / self.count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moments() {
        let mut m1 = Statistics::new(1);
        let mut m2 = Statistics::new(2);
        for v in [1.0, -2.0, 3.0] {
            m1.update(v);
            m2.update(v);
        }
        assert_eq!(m1.count, 3);
        assert!((m1.average() - 2.0 / 3.0).abs() < 1e-12);
        assert!((m2.average() - 14.0 / 3.0).abs() < 1e-12);
        assert_eq!(Statistics::new(1).average(), 0.0);
    }
}
