use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use versions_source::config::{self, Encoding, FailurePolicy, ProviderConfig};
use versions_source::datasource::{PROVIDER_TYPE_NAME, ProviderData, VersionsDataSource};

#[derive(Parser)]
#[command(name = "versions-source")]
#[command(version, about = "Look up package version and end-of-life metadata")]
struct Cli {
    /// Write logs to a file instead of stderr (defaults to the data directory)
    #[arg(long, global = true, num_args = 0..=1, require_equals = true, value_name = "PATH")]
    log_file: Option<Option<PathBuf>>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the data source schema as JSON
    DescribeSchema(SettingsArgs),
    /// Look up version metadata for one or more packages
    Read(ReadArgs),
}

#[derive(Args)]
struct SettingsArgs {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output representation
    #[arg(long, value_enum)]
    encoding: Option<Encoding>,
}

#[derive(Args)]
struct ReadArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Package to look up; repeat to look up several concurrently
    #[arg(long = "package", required = true)]
    packages: Vec<String>,

    /// What to do when the registry call fails
    #[arg(long, value_enum)]
    failure_policy: Option<FailurePolicy>,

    /// Registry API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token for the registry API
    #[arg(long)]
    token: Option<String>,
}

impl SettingsArgs {
    fn load(&self) -> anyhow::Result<ProviderConfig> {
        let mut config = match &self.config {
            Some(path) => ProviderConfig::load(path)?,
            None => ProviderConfig::default(),
        };
        if let Some(encoding) = self.encoding {
            config.versions.encoding = encoding;
        }
        Ok(config)
    }
}

impl ReadArgs {
    fn load(&self) -> anyhow::Result<ProviderConfig> {
        let mut config = self.settings.load()?;
        if let Some(policy) = self.failure_policy {
            config.versions.failure_policy = policy;
        }
        if let Some(base_url) = &self.base_url {
            config.registry.base_url = base_url.clone();
        }
        if let Some(token) = &self.token {
            config.registry.token = Some(token.clone());
        }
        Ok(config)
    }
}

async fn read(args: ReadArgs) -> anyhow::Result<()> {
    let config = args.load()?;

    let mut data_source = VersionsDataSource::new(config.versions);
    data_source.configure(ProviderData::from_settings(&config.registry)?);
    info!(
        "Reading {} with {} package(s)",
        VersionsDataSource::type_name(PROVIDER_TYPE_NAME),
        args.packages.len()
    );

    let results = data_source.read_many(&args.packages).await;
    let failed = results.iter().filter(|(_, r)| r.has_error()).count();
    let output: BTreeMap<_, _> = results.into_iter().collect();
    println!("{}", serde_json::to_string_pretty(&output)?);

    if failed > 0 {
        bail!("{} of {} lookups failed", failed, args.packages.len());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.map(|path| path.unwrap_or_else(config::log_path));
    let _guard = versions_source::logging::init(log_file.as_deref(), cli.log_json)?;

    match cli.command {
        Command::DescribeSchema(args) => {
            let config = args.load()?;
            let data_source = VersionsDataSource::new(config.versions);
            println!("{}", serde_json::to_string_pretty(&data_source.schema())?);
            Ok(())
        }
        Command::Read(args) => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(read(args)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_flag_without_value_does_not_consume_subcommand() {
        let cli = Cli::try_parse_from(["versions-source", "--log-file", "read", "--package", "x"])
            .unwrap();

        assert_eq!(cli.log_file, Some(None));
        assert!(matches!(cli.command, Command::Read(args) if args.packages == ["x"]));
    }

    #[test]
    fn log_file_flag_takes_path_after_equals() {
        let cli = Cli::try_parse_from([
            "versions-source",
            "--log-file=/tmp/versions.log",
            "describe-schema",
        ])
        .unwrap();

        assert_eq!(cli.log_file, Some(Some(PathBuf::from("/tmp/versions.log"))));
    }
}
