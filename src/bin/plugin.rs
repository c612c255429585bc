use std::io::Write;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use epgstation_plugin::{
    EpgStationClient, MetricAggregator, Reporter, config::Options, util::is_meta_request,
};
use tracing::{debug, error, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

fn init(level: LevelFilter) {
    let filter = filter::Targets::new().with_targets(vec![
        ("epgstation_plugin", level),
        ("mackerel_plugin_epgstation", level),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();

    let options = Options::parse();
    init(options.log_level());
    trace!("started with options: {options:?}");

    if let Err(e) = run(&options).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(options: &Options) -> anyhow::Result<()> {
    let reporter = Reporter::new(&options.prefix, options.tempfile_path());

    if is_meta_request() {
        debug!("printing graph definitions");
        let mut stdout = std::io::stdout().lock();
        reporter
            .write_definitions(&mut stdout)
            .context("failed to print graph definitions")?;
        return Ok(stdout.flush()?);
    }

    let client = EpgStationClient::new(&options.host, options.port)
        .context("failed to create EPGStation client")?;
    debug!("polling {}", client.base_url());

    let metrics = MetricAggregator::new(client)
        .fetch_metrics()
        .await
        .context("failed to fetch metrics")?;

    let mut stdout = std::io::stdout().lock();
    reporter
        .write_values(&mut stdout, &metrics, Utc::now())
        .context("failed to print metrics")?;
    Ok(stdout.flush()?)
}
