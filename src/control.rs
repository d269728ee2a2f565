// ================================
// src/control.rs - reflex decision
// ================================
use crate::{
    config::ReflexConfig,
    scan::{RangeScan, Side},
};
use geometry_msgs::msg::Twist;
use log::debug;

/// Velocity command produced for one scan. Never commands reverse.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionCommand {
    pub linear_x: f64,
    /// Positive turns toward the left half of the scan
    pub angular_z: f64,
}

impl MotionCommand {
    pub fn forward(speed: f64) -> Self {
        Self {
            linear_x: speed,
            angular_z: 0.0,
        }
    }
}

impl From<MotionCommand> for Twist {
    fn from(command: MotionCommand) -> Self {
        let mut twist = Twist::default();
        twist.linear.x = command.linear_x;
        twist.angular.z = command.angular_z;
        twist
    }
}

/// Outcome of the single pass over a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// No valid sample breached a threshold
    Clear,
    TurnAway(Side),
    Danger(Side),
}

pub struct ReflexController {
    config: ReflexConfig,
}

impl ReflexController {
    pub fn new(config: ReflexConfig) -> Self {
        if config.danger_threshold <= config.turn_away_threshold {
            // The turn-away test runs first, so it claims every sample the danger test would.
            debug!(
                "danger_threshold {} <= turn_away_threshold {}: danger branch is unreachable",
                config.danger_threshold, config.turn_away_threshold
            );
        }
        Self { config }
    }

    pub fn config(&self) -> &ReflexConfig {
        &self.config
    }

    /// Walk the valid samples in index order until one breaches a threshold.
    ///
    /// Returns the reaction together with the smallest valid distance seen up to and
    /// including the triggering sample, or `0.0` when no valid sample was seen.
    pub fn classify(&self, scan: &RangeScan) -> (Reaction, f64) {
        let mut minimum_distance: Option<f64> = None;

        for (index, range) in scan.valid_samples() {
            let range = f64::from(range);
            let closest = match minimum_distance {
                Some(min) if min <= range => min,
                _ => range,
            };
            minimum_distance = Some(closest);

            // Turn-away is tested before danger and the first hit ends the pass.
            if range < self.config.turn_away_threshold {
                return (Reaction::TurnAway(scan.side_of(index)), closest);
            }
            if range < self.config.danger_threshold {
                return (Reaction::Danger(scan.side_of(index)), closest);
            }
        }

        (Reaction::Clear, minimum_distance.unwrap_or(0.0))
    }

    /// Map one scan to exactly one motion command.
    pub fn evaluate(&self, scan: &RangeScan) -> MotionCommand {
        let (reaction, minimum_distance) = self.classify(scan);

        match reaction {
            Reaction::Danger(side) => {
                let command = MotionCommand {
                    linear_x: 0.0,
                    angular_z: side.turning_factor() * self.config.angular_velocity,
                };
                debug!("Publishing z = {}", command.angular_z);
                command
            }
            Reaction::TurnAway(side) => {
                let command = MotionCommand {
                    linear_x: self.config.linear_velocity * minimum_distance,
                    angular_z: side.turning_factor() * self.config.angular_velocity,
                };
                debug!("Publishing x = {}, z = {}", command.linear_x, command.angular_z);
                command
            }
            Reaction::Clear => {
                // Lower bound first, then upper, so max_speed wins if the limits cross.
                let speed = (self.config.linear_velocity * minimum_distance)
                    .max(self.config.min_speed)
                    .min(self.config.max_speed);
                debug!("Publishing x = {}, min_dist = {}", speed, minimum_distance);
                MotionCommand::forward(speed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn controller() -> ReflexController {
        ReflexController::new(ReflexConfig::default())
    }

    #[test]
    fn open_space_moves_forward_proportionally() {
        let ranges = [1.2_f32; 8];
        let command = controller().evaluate(&RangeScan::new(&ranges, 0.1, 5.0));
        assert_relative_eq!(command.linear_x, 0.6 * 1.2_f32 as f64);
        assert_eq!(command.angular_z, 0.0);
    }

    #[test]
    fn far_obstacles_are_capped_at_max_speed() {
        let ranges = [4.5_f32; 8];
        let command = controller().evaluate(&RangeScan::new(&ranges, 0.1, 5.0));
        assert_eq!(command, MotionCommand::forward(1.0));
    }

    #[test]
    fn minimum_is_taken_over_valid_samples_only() {
        let ranges = [0.05_f32, 3.0, 7.0, 2.0, f32::NAN, 1.5];
        let (reaction, minimum_distance) =
            controller().classify(&RangeScan::new(&ranges, 0.1, 5.0));
        assert_eq!(reaction, Reaction::Clear);
        assert_relative_eq!(minimum_distance, 1.5);
    }

    #[test]
    fn minimum_stops_at_the_triggering_sample() {
        let ranges = [2.0_f32, 0.55, 0.15, 0.4];
        let (reaction, minimum_distance) =
            controller().classify(&RangeScan::new(&ranges, 0.1, 5.0));
        assert_eq!(reaction, Reaction::TurnAway(Side::Left));
        assert_relative_eq!(minimum_distance, 0.55_f32 as f64);
    }

    #[test]
    fn close_sample_is_classified_as_turn_away_with_default_order() {
        let ranges = [2.0_f32, 2.0, 2.0, 0.2];
        let command = controller().evaluate(&RangeScan::new(&ranges, 0.1, 5.0));
        assert_relative_eq!(command.linear_x, 0.6 * 0.2_f32 as f64);
        assert_relative_eq!(command.angular_z, -0.2);
    }

    #[test]
    fn danger_stops_forward_motion_when_reachable() {
        let controller = ReflexController::new(ReflexConfig {
            danger_threshold: 0.6,
            turn_away_threshold: 0.3,
            ..ReflexConfig::default()
        });
        let ranges = [2.0_f32, 0.5, 2.0, 2.0];
        let scan = RangeScan::new(&ranges, 0.1, 5.0);

        assert_eq!(controller.classify(&scan).0, Reaction::Danger(Side::Left));
        let command = controller.evaluate(&scan);
        assert_eq!(command.linear_x, 0.0);
        assert_relative_eq!(command.angular_z, 0.2);
    }

    #[test]
    fn converts_into_twist() {
        let twist = Twist::from(MotionCommand {
            linear_x: 0.3,
            angular_z: -0.2,
        });
        assert_eq!(twist.linear.x, 0.3);
        assert_eq!(twist.linear.y, 0.0);
        assert_eq!(twist.angular.z, -0.2);
        assert_eq!(twist.angular.x, 0.0);
    }
}
