use anyhow::{anyhow, Context, Result};
use sailwatch::config::CONFIG;
use sailwatch::signature::sign;
use std::io::Read;

pub fn execute(payload: &str) -> Result<()> {
    let secret = CONFIG
        .webhook_secret
        .as_deref()
        .ok_or_else(|| anyhow!("WEBHOOK_SECRET is not set"))?;

    let body = if payload == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read payload from stdin")?;
        buf
    } else {
        std::fs::read(payload).with_context(|| format!("failed to read {}", payload))?
    };

    println!("{}", sign(secret, &body));
    Ok(())
}
