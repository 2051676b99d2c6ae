// Prints the cron trigger set derived from a schedule definition document

use std::env;
use std::fs;

use anyhow::Context;
use triggers::schedule::Schedule;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = env::args().nth(1).context("usage: dump_crons <schedule.json>")?;
    let raw = fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?;
    let document: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {path}"))?;

    let schedule = Schedule::from_value(&document)?;
    println!(
        "[{}] schedule with {} trigger(s)",
        schedule.schedule_type(),
        schedule.crons().len()
    );
    for cron in schedule.crons() {
        println!("  {cron}");
    }

    Ok(())
}
