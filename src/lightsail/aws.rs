use crate::lightsail::base::{InstanceSource, LightsailError, MetricSpec, MetricWindow};
use crate::models::{V1Domain, V1DomainEntry, V1RawDisk, V1RawInstance};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_lightsail::error::DisplayErrorContext;
use aws_sdk_lightsail::primitives::DateTime;
use aws_sdk_lightsail::types::{
    Disk, Domain, Instance, InstanceMetricName, MetricDatapoint, MetricStatistic, MetricUnit,
};
use aws_sdk_lightsail::Client as LightsailClient;
use tracing::debug;

/// Lightsail DNS zones are only served from this region.
const DOMAINS_REGION: &str = "us-east-1";

/// `InstanceSource` backed by the AWS Lightsail API.
pub struct LightsailSource {
    client: LightsailClient,
    domains_client: LightsailClient,
}

impl LightsailSource {
    pub fn new(client: LightsailClient, domains_client: LightsailClient) -> Self {
        Self {
            client,
            domains_client,
        }
    }

    /// Build clients from the default credential chain (env vars, profile, instance role).
    pub async fn from_region(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        let client = LightsailClient::new(&config);

        let domains_client = if region == DOMAINS_REGION {
            client.clone()
        } else {
            let domains_config = aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(DOMAINS_REGION))
                .load()
                .await;
            LightsailClient::new(&domains_config)
        };

        Self::new(client, domains_client)
    }
}

fn api_error<E>(operation: &'static str, err: E) -> LightsailError
where
    E: std::error::Error,
{
    LightsailError::Api {
        operation,
        message: DisplayErrorContext(err).to_string(),
    }
}

fn to_smithy_time(time: &chrono::DateTime<chrono::Utc>) -> DateTime {
    DateTime::from_secs(time.timestamp())
}

#[allow(deprecated)]
fn convert_disk(disk: &Disk) -> V1RawDisk {
    V1RawDisk {
        name: disk.name().map(str::to_string),
        size_in_gb: disk.size_in_gb(),
        is_system_disk: disk.is_system_disk(),
        state: disk.state().map(|s| s.as_str().to_string()),
        path: disk.path().map(str::to_string),
        gb_in_use: disk.gb_in_use(),
    }
}

fn convert_instance(instance: &Instance) -> Result<V1RawInstance, LightsailError> {
    let name = instance
        .name()
        .ok_or_else(|| LightsailError::InvalidResponse {
            operation: "GetInstances",
            message: "instance without a name".to_string(),
        })?
        .to_string();

    Ok(V1RawInstance {
        name,
        state: instance
            .state()
            .and_then(|s| s.name())
            .map(str::to_string),
        blueprint_id: instance.blueprint_id().map(str::to_string),
        bundle_id: instance.bundle_id().map(str::to_string),
        region_name: instance
            .location()
            .and_then(|l| l.region_name())
            .map(|r| r.as_str().to_string()),
        public_ip_address: instance.public_ip_address().map(str::to_string),
        disks: instance
            .hardware()
            .map(|h| h.disks().iter().map(convert_disk).collect())
            .unwrap_or_default(),
    })
}

fn convert_domain(domain: &Domain) -> V1Domain {
    V1Domain {
        name: domain.name().map(str::to_string),
        entries: domain
            .domain_entries()
            .iter()
            .map(|entry| V1DomainEntry {
                name: entry.name().map(str::to_string),
                target: entry.target().map(str::to_string),
                entry_type: entry.r#type().map(str::to_string),
            })
            .collect(),
    }
}

/// Pick the most recent datapoint's average.
fn latest_average(datapoints: &[MetricDatapoint]) -> Option<f64> {
    datapoints
        .iter()
        .filter(|dp| dp.average().is_some())
        .max_by_key(|dp| dp.timestamp().map(|t| (t.secs(), t.subsec_nanos())))
        .and_then(|dp| dp.average())
}

#[async_trait]
impl InstanceSource for LightsailSource {
    async fn list_instances(&self) -> Result<Vec<V1RawInstance>, LightsailError> {
        let mut instances = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let response = self
                .client
                .get_instances()
                .set_page_token(page_token.take())
                .send()
                .await
                .map_err(|e| api_error("GetInstances", e))?;

            for instance in response.instances() {
                instances.push(convert_instance(instance)?);
            }

            match response.next_page_token() {
                Some(token) if !token.is_empty() => page_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!("Fetched {} Lightsail instances", instances.len());
        Ok(instances)
    }

    async fn list_domains(&self) -> Result<Vec<V1Domain>, LightsailError> {
        let mut domains = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let response = self
                .domains_client
                .get_domains()
                .set_page_token(page_token.take())
                .send()
                .await
                .map_err(|e| api_error("GetDomains", e))?;

            domains.extend(response.domains().iter().map(convert_domain));

            match response.next_page_token() {
                Some(token) if !token.is_empty() => page_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!("Fetched {} Lightsail domains", domains.len());
        Ok(domains)
    }

    async fn metric_average(
        &self,
        instance_name: &str,
        metric: &MetricSpec,
        window: &MetricWindow,
    ) -> Result<Option<f64>, LightsailError> {
        let response = self
            .client
            .get_instance_metric_data()
            .instance_name(instance_name)
            .metric_name(InstanceMetricName::from(metric.name))
            .period(metric.period)
            .start_time(to_smithy_time(&window.start))
            .end_time(to_smithy_time(&window.end))
            .statistics(MetricStatistic::Average)
            .unit(MetricUnit::from(metric.unit))
            .send()
            .await
            .map_err(|e| api_error("GetInstanceMetricData", e))?;

        Ok(latest_average(response.metric_data()))
    }
}
