// In-memory InstanceSource used by tests.

use crate::lightsail::base::{InstanceSource, LightsailError, MetricSpec, MetricWindow};
use crate::models::{V1Domain, V1RawInstance};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum MetricScript {
    Value(f64),
    NoData,
    /// Fail this many calls, then report the value.
    FailThen(u32, f64),
    AlwaysFail,
}

#[derive(Default)]
pub struct MemorySource {
    pub instances: Vec<V1RawInstance>,
    pub domains: Vec<V1Domain>,
    pub fail_instances: bool,
    pub fail_domains: bool,
    pub metrics: HashMap<(String, String), MetricScript>,
    pub default_metric: Option<f64>,
    /// Simulated latency of each metric call.
    pub metric_latency: Duration,
    calls: Mutex<HashMap<(String, String), u32>>,
    windows: Mutex<Vec<MetricWindow>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MemorySource {
    pub fn new(instances: Vec<V1RawInstance>, domains: Vec<V1Domain>) -> Self {
        Self {
            instances,
            domains,
            ..Default::default()
        }
    }

    pub fn with_metric(mut self, instance: &str, metric: &str, script: MetricScript) -> Self {
        self.metrics
            .insert((instance.to_string(), metric.to_string()), script);
        self
    }

    pub fn calls(&self, instance: &str, metric: &str) -> u32 {
        self.calls
            .lock()
            .unwrap()
            .get(&(instance.to_string(), metric.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Every window passed to `metric_average`, in call order.
    pub fn windows(&self) -> Vec<MetricWindow> {
        self.windows.lock().unwrap().clone()
    }

    /// Highest number of metric calls observed running at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

fn scripted_failure(operation: &'static str) -> LightsailError {
    LightsailError::Api {
        operation,
        message: "scripted failure".to_string(),
    }
}

#[async_trait]
impl InstanceSource for MemorySource {
    async fn list_instances(&self) -> Result<Vec<V1RawInstance>, LightsailError> {
        if self.fail_instances {
            return Err(scripted_failure("GetInstances"));
        }
        Ok(self.instances.clone())
    }

    async fn list_domains(&self) -> Result<Vec<V1Domain>, LightsailError> {
        if self.fail_domains {
            return Err(scripted_failure("GetDomains"));
        }
        Ok(self.domains.clone())
    }

    async fn metric_average(
        &self,
        instance_name: &str,
        metric: &MetricSpec,
        window: &MetricWindow,
    ) -> Result<Option<f64>, LightsailError> {
        self.windows.lock().unwrap().push(*window);

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        if !self.metric_latency.is_zero() {
            tokio::time::sleep(self.metric_latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let key = (instance_name.to_string(), metric.name.to_string());
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(key.clone()).or_insert(0);
            *count += 1;
            *count
        };

        match self.metrics.get(&key) {
            Some(MetricScript::Value(v)) => Ok(Some(*v)),
            Some(MetricScript::NoData) => Ok(None),
            Some(MetricScript::FailThen(failures, v)) => {
                if call <= *failures {
                    Err(scripted_failure("GetInstanceMetricData"))
                } else {
                    Ok(Some(*v))
                }
            }
            Some(MetricScript::AlwaysFail) => Err(scripted_failure("GetInstanceMetricData")),
            None => Ok(self.default_metric),
        }
    }
}
