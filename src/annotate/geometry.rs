use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const ARROW_HEAD_LENGTH: f64 = 15.0;
pub const ARROW_HEAD_ANGLE: f64 = PI / 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn angle(&self) -> f64 {
        (self.to.y - self.from.y).atan2(self.to.x - self.from.x)
    }

    /// The part of the segment inside the rectangle `min`..`max`, or `None`
    /// when it misses the rectangle or has a non-finite endpoint.
    pub fn clip(&self, min: Point, max: Point) -> Option<Segment> {
        let coords = [self.from.x, self.from.y, self.to.x, self.to.y];
        if coords.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let dx = self.to.x - self.from.x;
        let dy = self.to.y - self.from.y;
        let (mut enter, mut leave) = (0.0_f64, 1.0_f64);
        for (p, q) in [
            (-dx, self.from.x - min.x),
            (dx, max.x - self.from.x),
            (-dy, self.from.y - min.y),
            (dy, max.y - self.from.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                if t > leave {
                    return None;
                }
                enter = enter.max(t);
            } else {
                if t < enter {
                    return None;
                }
                leave = leave.min(t);
            }
        }
        let at = |t: f64| Point::new(self.from.x + dx * t, self.from.y + dy * t);
        Some(Segment::new(at(enter), at(leave)))
    }
}

/// The two barbs of an arrow pointing from `from` to `to`, both starting at
/// the tip.
pub fn arrow_head(from: Point, to: Point) -> [Segment; 2] {
    let angle = Segment::new(from, to).angle();
    let barb = |offset: f64| {
        Point::new(
            to.x - ARROW_HEAD_LENGTH * (angle + offset).cos(),
            to.y - ARROW_HEAD_LENGTH * (angle + offset).sin(),
        )
    };
    [
        Segment::new(to, barb(-ARROW_HEAD_ANGLE)),
        Segment::new(to, barb(ARROW_HEAD_ANGLE)),
    ]
}

/// Shaft followed by both barbs.
pub fn arrow_strokes(from: Point, to: Point) -> [Segment; 3] {
    let [left, right] = arrow_head(from, to);
    [Segment::new(from, to), left, right]
}
