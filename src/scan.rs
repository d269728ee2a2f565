// ================================
// src/scan.rs - range scan view
// ================================
use sensor_msgs::msg::LaserScan;

/// Which half of the field of view a sample lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Indices below the midpoint
    Left,
    Right,
}

impl Side {
    /// Sign of the rotation that steers toward this side.
    pub fn turning_factor(self) -> f64 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Borrowed view of one scan. Index order follows angular order across the sensor.
#[derive(Debug, Clone, Copy)]
pub struct RangeScan<'a> {
    pub ranges: &'a [f32],
    pub range_min: f32,
    pub range_max: f32,
}

impl<'a> RangeScan<'a> {
    pub fn new(ranges: &'a [f32], range_min: f32, range_max: f32) -> Self {
        Self {
            ranges,
            range_min,
            range_max,
        }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Strictly inside `(range_min, range_max)`. NaN is never valid.
    pub fn is_valid(&self, range: f32) -> bool {
        range > self.range_min && range < self.range_max
    }

    /// First index of the right half.
    pub fn midpoint(&self) -> usize {
        self.ranges.len() / 2
    }

    pub fn side_of(&self, index: usize) -> Side {
        if index < self.midpoint() {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Valid samples with their original indices, in scan order.
    pub fn valid_samples(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.ranges
            .iter()
            .copied()
            .enumerate()
            .filter(move |&(_, range)| self.is_valid(range))
    }
}

impl<'a> From<&'a LaserScan> for RangeScan<'a> {
    fn from(msg: &'a LaserScan) -> Self {
        Self::new(&msg.ranges, msg.range_min, msg.range_max)
    }
}
