use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use cf_image_report::{
    config::AppConfig,
    domain::{self, CF_PLATFORM_URL, Payload},
    graphql::HttpGraphqlTransport,
    report::ImageReportBuilder,
    utils::{HeartbeatTimer, info as report_info},
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    report_info::init_tracing()?;

    let args = domain::ReportArgs::parse();

    let mut app_config = AppConfig::new().wrap_err("Failed to load configuration")?;
    if let Some(platform_url) = args.platform_url.clone() {
        app_config.platform_url = platform_url;
    }

    let payload = collect_payload(&args);
    debug!("Collected {} payload fields", payload.len());
    if !payload.contains_key(CF_PLATFORM_URL) {
        debug!("Using platform {}", app_config.platform_url);
    }

    let transport = HttpGraphqlTransport::from_config(&app_config)?;
    let builder = ImageReportBuilder::new(&transport, &app_config);

    let interval = app_config.heartbeat_interval().max(Duration::from_secs(1));
    let (beat_tx, mut beat_rx) = mpsc::unbounded_channel();
    let mut heartbeat = HeartbeatTimer::start(
        move || {
            let _ = beat_tx.send(());
        },
        interval,
    );

    let build = builder.build_url_headers(&payload);
    tokio::pin!(build);
    let mut waited = Duration::ZERO;
    let result = loop {
        tokio::select! {
            result = &mut build => break result,
            Some(()) = beat_rx.recv() => {
                waited += heartbeat.timeout();
                warn!("Still resolving the image report target after {:?}", waited);
                heartbeat.restart(None);
            }
        }
    };
    heartbeat.stop();

    let report = result?;
    report_info::print_report_info(&report);
    println!("{}", serde_json::to_string_pretty(&report)?);
    info!("Image report request ready");

    Ok(())
}

/// `CF_*` environment variables sorted by name, then `--field` overrides.
fn collect_payload(args: &domain::ReportArgs) -> Payload {
    let mut env_fields: Vec<(String, String)> = if args.no_env {
        Vec::new()
    } else {
        std::env::vars()
            .filter(|(key, _)| key.starts_with("CF_") && !key.starts_with("CF_REPORT_"))
            .collect()
    };
    env_fields.sort();

    env_fields
        .into_iter()
        .chain(args.fields.iter().cloned())
        .map(|(key, value)| (key, Some(value)))
        .collect()
}
