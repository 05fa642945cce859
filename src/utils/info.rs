use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::domain::{ImageReportRequest, X_CF_DATA};

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact().with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

pub fn print_report_info(report: &ImageReportRequest) {
    let (endpoint, query) = report
        .url
        .split_once('?')
        .unwrap_or((report.url.as_str(), ""));
    info!("Image report endpoint: {}", endpoint);

    if report.headers.contains_key(X_CF_DATA) {
        info!("Report fields travel in the {} header", X_CF_DATA);
    } else if query.is_empty() {
        warn!("Image report carries no fields");
    } else {
        info!("Report fields travel in the query string ({} fields)", query.split('&').count());
    }
}
