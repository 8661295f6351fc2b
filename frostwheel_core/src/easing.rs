//! Cubic-bezier timing curve used to turn linear spin progress into wheel motion.

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_EPSILON: f64 = 1e-3;
const SLOPE_EPSILON: f64 = 1e-3;

/// Polynomial form of a CSS-style `cubic-bezier(x1, y1, x2, y2)` curve
/// anchored at (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl CubicBezier {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    /// Fast start, long deceleration: `cubic-bezier(0.1, 0, 0.1, 1)`.
    pub fn spin() -> Self {
        Self::new(0.1, 0.0, 0.1, 1.0)
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn slope_x(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Newton-Raphson for the curve parameter whose x equals `x`. A result that
    /// has not converged after the iteration cap is returned as is.
    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = self.sample_x(t) - x;
            if err.abs() < NEWTON_EPSILON {
                break;
            }
            let slope = self.slope_x(t);
            if slope.abs() < SLOPE_EPSILON {
                break;
            }
            t -= err / slope;
        }
        t
    }

    pub fn ease(&self, x: f64) -> f64 {
        self.sample_y(self.solve_t(x))
    }
}

/// Eased progress for the spin animation.
pub fn ease_spin(progress: f64) -> f64 {
    CubicBezier::spin().ease(progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_exact() {
        assert_eq!(ease_spin(0.0), 0.0);
        assert_eq!(ease_spin(1.0), 1.0);
    }

    #[test]
    fn non_decreasing_on_frame_grid() {
        let mut prev = ease_spin(0.0);
        for i in 1..=1000 {
            let v = ease_spin(i as f64 / 1000.0);
            assert!(v >= prev, "easing dipped at {i}: {prev} -> {v}");
            prev = v;
        }
    }

    #[test]
    fn fine_grid_dips_stay_below_solver_tolerance() {
        // The 1e-3 early exit can leave the solver a few thousandths short.
        let mut prev = ease_spin(0.0);
        for i in 1..=20_000 {
            let v = ease_spin(i as f64 / 20_000.0);
            assert!(v >= prev - 5e-3);
            prev = prev.max(v);
        }
    }

    #[test]
    fn decelerates() {
        // Most of the travel happens in the first half.
        let half = ease_spin(0.5);
        assert!(half > 0.8 && half < 0.9, "{half}");
        assert!(ease_spin(0.9) > 0.99);
    }

    #[test]
    fn deterministic() {
        for i in 0..=50 {
            let x = i as f64 / 50.0;
            assert_eq!(ease_spin(x).to_bits(), CubicBezier::spin().ease(x).to_bits());
        }
    }

    #[test]
    fn linear_curve_is_identity() {
        let linear = CubicBezier::new(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for i in 0..=10 {
            let x = i as f64 / 10.0;
            assert!((linear.ease(x) - x).abs() < 1e-9);
        }
    }
}
