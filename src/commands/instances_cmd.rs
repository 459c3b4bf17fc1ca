use anyhow::{Context, Result};
use sailwatch::config::CONFIG;
use sailwatch::inventory::{collect, CollectPolicy};
use sailwatch::lightsail::LightsailSource;
use sailwatch::mappings::InstanceMappings;
use sailwatch::models::V1InstanceSummary;

pub async fn execute(json: bool) -> Result<()> {
    let mappings = InstanceMappings::load(CONFIG.mappings_path.as_deref())
        .context("failed to load instance mappings")?;
    let source = LightsailSource::from_region(&CONFIG.aws_region).await;
    let policy = CollectPolicy::from_config(&CONFIG);

    let instances = collect(&source, &mappings, &policy)
        .await
        .context("failed to list instances or domains")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&instances)?);
    } else {
        render_table(&instances).printstd();
    }

    Ok(())
}

fn render_table(instances: &[V1InstanceSummary]) -> prettytable::Table {
    let mut table = prettytable::Table::new();

    table.add_row(prettytable::Row::new(vec![
        prettytable::Cell::new("NAME"),
        prettytable::Cell::new("STATE"),
        prettytable::Cell::new("REGION"),
        prettytable::Cell::new("PUBLIC IP"),
        prettytable::Cell::new("DNS"),
        prettytable::Cell::new("CPU %"),
        prettytable::Cell::new("DISKS"),
    ]));

    for instance in instances {
        let cpu = instance
            .metrics
            .get("CPUUtilization")
            .map(String::as_str)
            .unwrap_or("N/A");

        table.add_row(prettytable::Row::new(vec![
            prettytable::Cell::new(&instance.name),
            prettytable::Cell::new(instance.state.as_deref().unwrap_or("N/A")),
            prettytable::Cell::new(instance.region.as_deref().unwrap_or("N/A")),
            prettytable::Cell::new(&instance.public_ip),
            prettytable::Cell::new(&instance.dns),
            prettytable::Cell::new(cpu),
            prettytable::Cell::new(&instance.disks.len().to_string()),
        ]));
    }

    table
}
