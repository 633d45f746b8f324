use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result, WrapErr, miette};
use std::fs;
use std::path::PathBuf;
use swiftpass::application::client::SwiftpassClient;
use swiftpass::application::notify::NotificationVerifier;
use swiftpass::config::{ClientConfig, Credentials};
use swiftpass::domain::operation::Operation;
use swiftpass::domain::params::Params;
use swiftpass::infrastructure::http::HttpTransport;
use swiftpass::interfaces::csv::report_reader::parse_report;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (TOML). `SWIFTPASS_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a settlement report and print it as JSON
    Report {
        /// Report CSV file
        input: PathBuf,
    },
    /// Verify a payment notification body and print its fields as JSON
    Notify {
        /// File holding the raw notification XML
        input: PathBuf,
    },
    /// Call a gateway operation and print the validated response as JSON
    Call {
        operation: OperationArg,

        /// Request field, repeatable
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_pair)]
        params: Vec<(String, String)>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OperationArg {
    CreateOrder,
    OrderQuery,
    Refund,
    RefundQuery,
    CloseOrder,
}

impl From<OperationArg> for Operation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::CreateOrder => Operation::CreateOrder,
            OperationArg::OrderQuery => Operation::OrderQuery,
            OperationArg::Refund => Operation::Refund,
            OperationArg::RefundQuery => Operation::RefundQuery,
            OperationArg::CloseOrder => Operation::CloseOrder,
        }
    }
}

fn parse_pair(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))
}

fn load_credentials(path: Option<&PathBuf>) -> Result<(ClientConfig, Credentials)> {
    let config = ClientConfig::load(path.map(PathBuf::as_path)).into_diagnostic()?;
    let credentials = Credentials::from_config(&config).into_diagnostic()?;
    Ok((config, credentials))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Command::Report { input } => {
            let text = fs::read_to_string(&input)
                .into_diagnostic()
                .wrap_err_with(|| format!("cannot read {}", input.display()))?;
            let report = parse_report(&text).into_diagnostic()?;
            serde_json::to_string_pretty(&report).into_diagnostic()?
        }
        Command::Notify { input } => {
            let xml = fs::read_to_string(&input).into_diagnostic()?;
            let (_, credentials) = load_credentials(cli.config.as_ref())?;
            if credentials.public_key.is_none() {
                return Err(miette!("no public key configured; set public_key or public_key_path"));
            }
            let fields = NotificationVerifier::new(credentials.public_key)
                .verify(&xml)
                .into_diagnostic()?;
            serde_json::to_string_pretty(&fields).into_diagnostic()?
        }
        Command::Call { operation, params } => {
            let (config, credentials) = load_credentials(cli.config.as_ref())?;
            let transport = HttpTransport::with_endpoint(config.endpoint());
            let client = SwiftpassClient::new(credentials, Box::new(transport));

            let params: Params = params.into_iter().collect();
            let envelope = client
                .execute(operation.into(), params)
                .await
                .into_diagnostic()?;
            serde_json::to_string_pretty(&envelope).into_diagnostic()?
        }
    };

    println!("{output}");
    Ok(())
}
