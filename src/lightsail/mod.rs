pub mod aws;
pub mod base;
#[cfg(test)]
pub mod memory;

pub use aws::LightsailSource;
pub use base::{InstanceSource, LightsailError, MetricSpec, MetricWindow, METRICS};
