// ================================
// src/node.rs - ROS2 node wiring
// ================================
use anyhow::Result;
use geometry_msgs::msg::Twist;
use log::{error, info, trace};
use rclrs::*;
use sensor_msgs::msg::LaserScan;
use std::{sync::Arc, time::Instant};

use crate::{
    config::Params,
    control::{MotionCommand, ReflexController},
    scan::RangeScan,
};

/// Output boundary: wherever motion commands go.
pub trait CommandSink {
    fn send(&self, command: MotionCommand) -> Result<()>;
}

impl CommandSink for Publisher<Twist> {
    fn send(&self, command: MotionCommand) -> Result<()> {
        self.publish(Twist::from(command))?;
        Ok(())
    }
}

/// Evaluate one scan and hand exactly one command to the sink.
pub fn handle_scan<S>(
    controller: &ReflexController,
    scan: &RangeScan,
    sink: &S,
) -> Result<MotionCommand>
where
    S: CommandSink + ?Sized,
{
    let started = Instant::now();
    let command = controller.evaluate(scan);
    trace!("Processed {} ranges in {:?}", scan.len(), started.elapsed());

    sink.send(command)?;
    Ok(command)
}

pub struct ReflexNode {
    _scan_subscription: Subscription<LaserScan>,
    controller: Arc<ReflexController>,
}

impl ReflexNode {
    pub fn new(executor: &Executor, params: Params) -> Result<Self> {
        let Params { node: node_params, reflex } = params;
        let node = executor.create_node(node_params.node_name.as_str())?;

        let cmd_vel_publisher =
            node.create_publisher::<Twist>(node_params.cmd_vel_topic.as_str())?;
        let controller = Arc::new(ReflexController::new(reflex));
        let controller_clone = controller.clone();

        let _scan_subscription = node.create_subscription::<LaserScan, _>(
            node_params.scan_topic.as_str(),
            move |msg: LaserScan| {
                let scan = RangeScan::from(&msg);
                if let Err(e) = handle_scan(&controller_clone, &scan, &cmd_vel_publisher) {
                    error!("Error during scan process: {}", e);
                }
            },
        )?;

        info!(
            "Node '{}' listening on '{}', commanding '{}'",
            node_params.node_name, node_params.scan_topic, node_params.cmd_vel_topic
        );

        Ok(Self {
            _scan_subscription,
            controller,
        })
    }

    pub fn controller(&self) -> &ReflexController {
        &self.controller
    }
}
