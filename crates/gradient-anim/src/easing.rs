//! Cubic-bezier timing functions.
//!
//! CSS timing functions are reduced to four control points and evaluated with
//! Newton-Raphson iteration (bisection when the slope is too flat):
//! - Linear
//! - Ease, EaseIn, EaseOut, EaseInOut (standard CSS curves)
//! - CubicBezier (custom bezier curves)
//!
//! Curves are shared through an [`EasingCache`] keyed by their control-point
//! signature. The cache only grows; handles are `Arc`s so a curve outlives any
//! provider that uses it.
//!
//! # Usage
//!
//! ```
//! use gradient_anim::easing::{BezierPoints, EasingCache};
//!
//! let mut cache = EasingCache::new();
//! let ease = cache.resolve(BezierPoints::parse("ease").unwrap());
//! let progress = ease.evaluate(0.5);
//! assert!(progress > 0.7 && progress < 0.9);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::TimingError;

/// Control points `(x1, y1)` and `(x2, y2)` of a CSS cubic-bezier curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierPoints {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BezierPoints {
    pub const LINEAR: Self = Self::from_array([0.0, 0.0, 1.0, 1.0]);
    /// CSS `ease`: slow start, fast middle, slow end.
    pub const EASE: Self = Self::from_array([0.25, 0.1, 0.25, 1.0]);
    pub const EASE_IN: Self = Self::from_array([0.42, 0.0, 1.0, 1.0]);
    pub const EASE_OUT: Self = Self::from_array([0.0, 0.0, 0.58, 1.0]);
    pub const EASE_IN_OUT: Self = Self::from_array([0.42, 0.0, 0.58, 1.0]);

    const fn from_array(p: [f64; 4]) -> Self {
        Self {
            x1: p[0],
            y1: p[1],
            x2: p[2],
            y2: p[3],
        }
    }

    /// Create custom control points. x values must be in [0, 1].
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, TimingError> {
        let points = Self { x1, y1, x2, y2 };
        if !points.as_array().iter().all(|v| v.is_finite()) {
            return Err(TimingError::InvalidBezier {
                input: points.to_string(),
                reason: "control points must be finite",
            });
        }
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(TimingError::InvalidBezier {
                input: points.to_string(),
                reason: "x values must be in [0, 1]",
            });
        }
        Ok(points)
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Resolve a preset keyword or a `cubic-bezier(x1, y1, x2, y2)` string.
    pub fn parse(input: &str) -> Result<Self, TimingError> {
        let v = input.trim().to_ascii_lowercase();
        match v.as_str() {
            "linear" => return Ok(Self::LINEAR),
            "ease" => return Ok(Self::EASE),
            "ease-in" => return Ok(Self::EASE_IN),
            "ease-out" => return Ok(Self::EASE_OUT),
            "ease-in-out" => return Ok(Self::EASE_IN_OUT),
            _ => {}
        }
        let Some(args) = v
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Err(TimingError::UnsupportedTimingFunction(input.trim().to_string()));
        };
        let values = args
            .split(',')
            .map(|n| n.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| TimingError::InvalidBezier {
                input: input.trim().to_string(),
                reason: "arguments must be numbers",
            })?;
        match values.as_slice() {
            [x1, y1, x2, y2] => Self::new(*x1, *y1, *x2, *y2),
            _ => Err(TimingError::InvalidBezier {
                input: input.trim().to_string(),
                reason: "expected four arguments",
            }),
        }
    }

    /// Cache key: the four numbers as a JSON array.
    pub fn signature(&self) -> String {
        serde_json::Value::from(self.as_array().to_vec()).to_string()
    }
}

impl Default for BezierPoints {
    fn default() -> Self {
        Self::EASE
    }
}

impl fmt::Display for BezierPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cubic-bezier({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// A resolved easing curve mapping linear progress to eased progress.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicBezier {
    points: BezierPoints,
}

impl CubicBezier {
    pub fn new(points: BezierPoints) -> Self {
        Self { points }
    }

    pub fn points(&self) -> BezierPoints {
        self.points
    }

    /// Evaluate the curve at progress `t`; input is clamped to [0, 1].
    pub fn evaluate(&self, t: f64) -> f64 {
        let BezierPoints { x1, y1, x2, y2 } = self.points;
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        if x1 == y1 && x2 == y2 {
            return t;
        }
        let s = solve_bezier_x(x1, x2, t);
        bezier_component(y1, y2, s)
    }
}

/// Solve for the curve parameter whose x equals `target_x`.
fn solve_bezier_x(x1: f64, x2: f64, target_x: f64) -> f64 {
    let mut t = target_x;
    for _ in 0..8 {
        let x = bezier_component(x1, x2, t) - target_x;
        if x.abs() < 1e-7 {
            return t;
        }
        let dx = bezier_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    // Newton stalled on a flat segment; x(t) is monotonic so bisect.
    let (mut lo, mut hi) = (0.0, 1.0);
    t = target_x;
    for _ in 0..50 {
        let x = bezier_component(x1, x2, t);
        if (x - target_x).abs() < 1e-7 {
            break;
        }
        if x < target_x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    t
}

/// One coordinate of the curve: 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_component(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

/// d/dt = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_derivative(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// Append-only store of resolved curves, keyed by control-point signature.
#[derive(Debug, Default)]
pub struct EasingCache {
    curves: HashMap<String, Arc<CubicBezier>>,
}

impl EasingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the curve for `points`, creating it on first use.
    pub fn resolve(&mut self, points: BezierPoints) -> Arc<CubicBezier> {
        self.curves
            .entry(points.signature())
            .or_insert_with(|| Arc::new(CubicBezier::new(points)))
            .clone()
    }

    pub fn contains(&self, points: &BezierPoints) -> bool {
        self.curves.contains_key(&points.signature())
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.001;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn curve(s: &str) -> CubicBezier {
        CubicBezier::new(BezierPoints::parse(s).unwrap())
    }

    #[test]
    fn test_linear() {
        let ease = curve("linear");
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert!(approx_eq(ease.evaluate(t), t));
        }
    }

    #[test]
    fn test_ease_boundaries() {
        let ease = curve("ease");
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));

        let mid = ease.evaluate(0.5);
        assert!(mid > 0.7 && mid < 0.9, "CSS ease mid-point should be ~0.8, got {}", mid);

        let early = ease.evaluate(0.25);
        let late = ease.evaluate(0.75);
        assert!(early < mid);
        assert!(mid < late);
    }

    #[test]
    fn test_ease_in_and_out() {
        let ease_in = curve("ease-in");
        assert!(ease_in.evaluate(0.25) < 0.25);
        assert!(ease_in.evaluate(0.5) < 0.5);

        let ease_out = curve("ease-out");
        assert!(ease_out.evaluate(0.25) > 0.25);
        assert!(ease_out.evaluate(0.5) > 0.5);
    }

    #[test]
    fn test_ease_in_out_symmetry() {
        let ease = curve("ease-in-out");
        assert!(approx_eq(ease.evaluate(0.5), 0.5));
        assert!(approx_eq(ease.evaluate(0.25) + ease.evaluate(0.75), 1.0));
    }

    #[test]
    fn test_custom_bezier() {
        let ease = curve("cubic-bezier(0.4, 0, 0.2, 1)");
        assert_eq!(ease.points(), BezierPoints::new(0.4, 0.0, 0.2, 1.0).unwrap());
        assert!(approx_eq(ease.evaluate(1.0), 1.0));
        assert!(ease.evaluate(0.5) > 0.5);
    }

    #[test]
    fn test_steep_curve_converges() {
        // x flattens near t = 1, where Newton hands off to bisection.
        let ease = curve("cubic-bezier(1, 0, 1, 0)");
        let mut last = 0.0;
        for i in 1..10 {
            let v = ease.evaluate(i as f64 / 10.0);
            assert!(v >= last, "curve must be monotonic");
            last = v;
        }
    }

    #[test]
    fn test_clamping() {
        let ease = curve("ease");
        assert!(approx_eq(ease.evaluate(-0.5), 0.0));
        assert!(approx_eq(ease.evaluate(1.5), 1.0));
    }

    #[test]
    fn test_invalid_bezier() {
        assert!(matches!(
            BezierPoints::parse("cubic-bezier(-0.1, 0, 0.5, 1)"),
            Err(TimingError::InvalidBezier { .. })
        ));
        assert!(matches!(
            BezierPoints::parse("cubic-bezier(0.5, 0, 1.5, 1)"),
            Err(TimingError::InvalidBezier { .. })
        ));
        assert!(matches!(
            BezierPoints::parse("cubic-bezier(0.5, 0, 1)"),
            Err(TimingError::InvalidBezier { .. })
        ));
        assert!(matches!(
            BezierPoints::parse("steps(4, end)"),
            Err(TimingError::UnsupportedTimingFunction(_))
        ));
    }

    #[test]
    fn test_signature_and_default() {
        assert_eq!(BezierPoints::EASE.signature(), "[0.25,0.1,0.25,1.0]");
        assert_eq!(BezierPoints::default(), BezierPoints::EASE);
    }

    #[test]
    fn test_cache_reuses_curves() {
        let mut cache = EasingCache::new();
        let a = cache.resolve(BezierPoints::EASE);
        let b = cache.resolve(BezierPoints::parse("cubic-bezier(0.25, 0.1, 0.25, 1)").unwrap());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        cache.resolve(BezierPoints::LINEAR);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&BezierPoints::LINEAR));
        assert!(!cache.contains(&BezierPoints::EASE_OUT));
    }
}
