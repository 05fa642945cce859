use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Build the Codefresh image-report URL and headers from CF_* parameters"
)]
pub struct ReportArgs {
    /// Extra payload field, repeatable (overrides CF_* environment variables)
    #[clap(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
    /// Platform base URL used when the payload has no CF_PLATFORM_URL
    #[clap(long)]
    pub platform_url: Option<String>,
    /// Ignore CF_* variables from the process environment
    #[clap(long)]
    pub no_env: bool,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("missing key in '{}'", raw)),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}
