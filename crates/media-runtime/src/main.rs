//! # Media Runtime
//!
//! Runs the demo source end to end and prints the run summary as JSON.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize telemetry
//! 3. Start the platform (creates the standard work queue)
//! 4. Play the source and drain its events
//! 5. Shut the source and the platform down

use anyhow::{Context, Result};
use media_runtime::{MediaRuntime, RuntimeConfig};
use media_telemetry::init_telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env();
    let _telemetry =
        init_telemetry(config.telemetry.clone()).context("Failed to initialize telemetry")?;

    info!(
        config = %serde_json::to_string(&config).context("Failed to serialize config")?,
        "Configuration loaded"
    );

    let runtime = MediaRuntime::new(config);
    let summary = runtime.run().await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
    );
    Ok(())
}
