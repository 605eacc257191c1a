use tracing::warn;

use crate::core::{Domain, SamplePoint};
use crate::eval::BoundExpression;

/// Lazy iterator over the finite samples of an expression across a domain.
///
/// Positions step from `domain.min` to `domain.max` inclusive, derived from
/// an integer index so long passes do not drift. Evaluations that fail or
/// produce a non-finite value drop the point and the pass continues; x is
/// strictly increasing across everything emitted. Restart by constructing a
/// new iterator.
#[derive(Debug, Clone)]
pub struct SampleIter {
    expr: BoundExpression,
    domain: Domain,
    index: usize,
    count: usize,
}

impl SampleIter {
    #[must_use]
    pub fn new(expr: BoundExpression, domain: Domain) -> Self {
        let count = domain.sample_count();
        Self {
            expr,
            domain,
            index: 0,
            count,
        }
    }

    /// Next sample index to be visited; doubles as the stream cursor.
    #[must_use]
    pub fn position(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn expr(&self) -> &BoundExpression {
        &self.expr
    }

    #[must_use]
    pub fn domain(&self) -> Domain {
        self.domain
    }
}

impl Iterator for SampleIter {
    type Item = SamplePoint;

    fn next(&mut self) -> Option<SamplePoint> {
        while self.index < self.count {
            let x = self.domain.x_at(self.index);
            self.index += 1;
            if !x.is_finite() {
                continue;
            }
            // per-point failures drop the point, never the pass
            let Ok(y) = self.expr.eval_at(x) else {
                continue;
            };
            return Some(SamplePoint::new(x, y));
        }
        None
    }
}

/// Samples the full domain into a vector.
///
/// An everywhere-undefined expression yields an empty vector; that is a
/// benign outcome worth a warning, not an error.
#[must_use]
pub fn sample(expr: &BoundExpression, domain: Domain) -> Vec<SamplePoint> {
    let points: Vec<SamplePoint> = SampleIter::new(expr.clone(), domain).collect();
    if points.is_empty() {
        warn!(
            expression = %expr.source(),
            min = domain.min,
            max = domain.max,
            step = domain.step,
            "curve produced no finite samples"
        );
    }
    points
}

/// Samples the full domain with evaluation fanned out across a rayon pool.
///
/// The evaluator is pure and reentrant, so per-x work parallelizes freely;
/// collecting an indexed parallel iterator preserves increasing-x order.
#[cfg(feature = "parallel-sampling")]
#[must_use]
pub fn sample_parallel(expr: &BoundExpression, domain: Domain) -> Vec<SamplePoint> {
    use rayon::prelude::*;

    let points: Vec<SamplePoint> = (0..domain.sample_count())
        .into_par_iter()
        .filter_map(|index| {
            let x = domain.x_at(index);
            if !x.is_finite() {
                return None;
            }
            let y = expr.eval_at(x).ok()?;
            Some(SamplePoint::new(x, y))
        })
        .collect();
    if points.is_empty() {
        warn!(
            expression = %expr.source(),
            min = domain.min,
            max = domain.max,
            step = domain.step,
            "curve produced no finite samples"
        );
    }
    points
}
