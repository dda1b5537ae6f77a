// File: crates/harvest-core/src/geometry.rs
// Summary: Lightweight geometry for stalks and leaves, in stalk-local pixels.

use serde::Serialize;

use crate::layout::Side;
use crate::types::{FIRST_STALK_X, STALK_SPACING};

pub const STALK_WIDTH: f64 = 3.0;
pub const LEAF_WIDTH: f64 = 20.0;
pub const LEAF_HEIGHT: f64 = 30.0;
/// Leaves are rotated by this many degrees about their attachment point,
/// negative on the left side.
pub const LEAF_ROTATION_DEG: f64 = 140.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RectF {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl RectF {
    pub fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f64 { self.right - self.left }
    pub fn height(&self) -> f64 { self.bottom - self.top }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

/// Plot-space X of the stalk at position `index`.
#[inline]
pub fn stalk_x(index: usize) -> f64 {
    index as f64 * STALK_SPACING + FIRST_STALK_X
}

/// Stalk body, centred on x = 0, growing down from the stalk top.
pub fn stalk_rect(height: f64) -> RectF {
    RectF::from_ltwh(-STALK_WIDTH / 2.0, 0.0, STALK_WIDTH, height)
}

/// A leaf drawn as two quadratic curves: out to the tip along one edge and back
/// along the other, then rotated about `anchor`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QuadLeaf {
    pub anchor: (f64, f64),
    pub ctrl_out: (f64, f64),
    pub tip: (f64, f64),
    pub ctrl_back: (f64, f64),
    pub rotation_deg: f64,
}

impl QuadLeaf {
    /// Leaf attached at `offset` pixels below the stalk top.
    pub fn new(side: Side, offset: f64) -> Self {
        let (ox, dir, rotation_deg) = match side {
            Side::Left => (-STALK_WIDTH, -1.0, -LEAF_ROTATION_DEG),
            Side::Right => (STALK_WIDTH, 1.0, LEAF_ROTATION_DEG),
        };
        let mid = offset + LEAF_HEIGHT / 2.0;
        Self {
            anchor: (ox, offset),
            ctrl_out: (ox + dir * LEAF_WIDTH / 2.0, mid),
            tip: (ox, offset + LEAF_HEIGHT),
            ctrl_back: (ox - dir * LEAF_WIDTH / 2.0, mid),
            rotation_deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_leaf_mirrors_right() {
        let l = QuadLeaf::new(Side::Left, 10.0);
        let r = QuadLeaf::new(Side::Right, 10.0);
        assert_eq!(l.anchor, (-3.0, 10.0));
        assert_eq!(r.anchor, (3.0, 10.0));
        assert_eq!(l.ctrl_out, (-13.0, 25.0));
        assert_eq!(r.ctrl_out, (13.0, 25.0));
        assert_eq!(l.tip, (-3.0, 40.0));
        assert_eq!(l.rotation_deg, -r.rotation_deg);
    }

    #[test]
    fn stalks_are_spaced_evenly() {
        assert_eq!(stalk_x(0), 40.0);
        assert_eq!(stalk_x(10), 840.0);
        assert_eq!(stalk_rect(100.0).width(), 3.0);
    }
}
