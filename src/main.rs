// ================================
// src/main.rs
// ================================
use anyhow::{Context as _, Result};
use log::info;
use rclrs::*;
use reflex_explore::{Params, ReflexNode};

fn main() -> Result<()> {
    env_logger::init();
    info!("Reflex exploration node with Rust");

    let params = Params::load().context("Failed to load TOML configuration")?;
    info!("{:#?}", params);

    let mut executor = Context::default_from_env()?.create_basic_executor();
    let _node = ReflexNode::new(&executor, params)?;
    executor.spin(SpinOptions::default()).first_error()?;
    Ok(())
}
