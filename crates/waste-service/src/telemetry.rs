use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Fails if the filter does not parse or a
/// subscriber is already set.
pub fn init_tracing(json: bool, filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!(e))
}
