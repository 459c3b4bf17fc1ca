// src/inventory.rs

use crate::config::Config;
use crate::lightsail::{InstanceSource, LightsailError, MetricSpec, MetricWindow, METRICS};
use crate::locale::format_pt_br;
use crate::mappings::InstanceMappings;
use crate::models::{
    V1DiskSummary, V1Domain, V1DomainEntry, V1InstanceSummary, V1RawInstance, FETCH_ERROR,
    NO_DATA, NO_DOMAIN, NO_PUBLIC_IP,
};
use crate::retry::retry_with_delay;
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error};

/// How metric datapoints are fetched for each instance.
#[derive(Debug, Clone)]
pub struct CollectPolicy {
    pub retries: u32,
    pub retry_delay: Duration,
    pub window_secs: i64,
    pub concurrency: usize,
}

impl Default for CollectPolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl CollectPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            retries: config.metric_retries,
            retry_delay: config.metric_retry_delay(),
            window_secs: config.metric_window_secs,
            concurrency: config.metric_concurrency.max(1),
        }
    }
}

/// List every instance and enrich it with metrics, disks and DNS.
///
/// Failing to list instances or domains fails the whole collection. A metric
/// that cannot be fetched is reported inline and never fails the collection.
pub async fn collect(
    source: &dyn InstanceSource,
    mappings: &InstanceMappings,
    policy: &CollectPolicy,
) -> Result<Vec<V1InstanceSummary>, LightsailError> {
    let instances = source.list_instances().await?;
    let domains = source.list_domains().await?;
    let window = MetricWindow::last(policy.window_secs);

    debug!(
        "Collecting {} metrics for {} instances",
        METRICS.len(),
        instances.len()
    );

    let jobs = instances
        .iter()
        .flat_map(|instance| METRICS.iter().map(move |metric| (instance, metric)));

    let readings: Vec<String> = stream::iter(jobs)
        .map(|(instance, metric)| fetch_metric(source, instance, metric, &window, policy))
        .buffered(policy.concurrency.max(1))
        .collect()
        .await;

    let summaries = instances
        .iter()
        .zip(readings.chunks(METRICS.len()))
        .map(|(instance, values)| {
            let metrics = METRICS
                .iter()
                .zip(values)
                .map(|(metric, value)| (metric.name.to_string(), value.clone()))
                .collect();
            summarize(instance, metrics, &domains, mappings)
        })
        .collect();

    Ok(summaries)
}

async fn fetch_metric(
    source: &dyn InstanceSource,
    instance: &V1RawInstance,
    metric: &MetricSpec,
    window: &MetricWindow,
    policy: &CollectPolicy,
) -> String {
    let name = instance.name.as_str();
    let result = retry_with_delay(policy.retries, policy.retry_delay, move || {
        source.metric_average(name, metric, window)
    })
    .await;

    match result {
        Ok(Some(average)) => format_pt_br(average),
        Ok(None) => NO_DATA.to_string(),
        Err(err) => {
            error!(
                "Failed to fetch metric {} for instance {}: {}",
                metric.name, name, err
            );
            FETCH_ERROR.to_string()
        }
    }
}

/// The first domain entry pointing at `public_ip`, across all zones.
pub fn find_domain_entry<'a>(domains: &'a [V1Domain], public_ip: &str) -> Option<&'a V1DomainEntry> {
    domains
        .iter()
        .flat_map(|domain| domain.entries.iter())
        .find(|entry| entry.target.as_deref() == Some(public_ip))
}

/// Flatten a raw instance into its served shape.
pub fn summarize(
    instance: &V1RawInstance,
    metrics: BTreeMap<String, String>,
    domains: &[V1Domain],
    mappings: &InstanceMappings,
) -> V1InstanceSummary {
    let mapping = mappings.get(&instance.name);

    let associated_dns = instance
        .public_ip_address
        .as_deref()
        .and_then(|ip| find_domain_entry(domains, ip))
        .and_then(|entry| entry.name.clone());

    let name = mapping
        .and_then(|m| m.name.clone())
        .unwrap_or_else(|| instance.name.clone());
    let dns = mapping
        .and_then(|m| m.dns.clone())
        .or(associated_dns)
        .unwrap_or_else(|| NO_DOMAIN.to_string());

    V1InstanceSummary {
        name,
        state: instance.state.clone(),
        blueprint: instance.blueprint_id.clone(),
        bundle: instance.bundle_id.clone(),
        region: instance.region_name.clone(),
        public_ip: instance
            .public_ip_address
            .clone()
            .unwrap_or_else(|| NO_PUBLIC_IP.to_string()),
        dns,
        metrics,
        disks: instance.disks.iter().map(V1DiskSummary::from).collect(),
    }
}
