use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::anyhow;

use clap::{Parser, ValueEnum};

use clap_verbosity_flag::{Verbosity, WarnLevel};

use genip::{AddressType, Fetcher, Filter, DEFAULT_TIMEOUT};

use tracing_log::AsTrace;

use crate::{
    output::Output,
    run::{run_custom, run_default, CustomOptions},
};

/// Entry-point function for the `genip` CLI tool.
#[allow(clippy::missing_errors_doc)]
pub fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    args.init_logging()?;
    let fetcher = Fetcher::new(args.timeout());
    match args.into_mode()? {
        Mode::Default => run_default(&fetcher, Path::new(".")),
        Mode::Custom(options) => run_custom(&fetcher, &options),
    }
}

/// Generate nftables-style address-set definitions from APNIC delegation statistics.
///
/// Without any of --name, --location, --address-type or --output, writes the CN ipv4 and ipv6
/// sets `chnip4` and `chnip6` to chnip4.ips and chnip6.ips in the current directory.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about)]
struct Cli {
    /// Name of the address-set definition.
    #[arg(short, long)]
    name: Option<String>,

    /// Country codes to include, like CN.
    #[arg(short, long, num_args = 1..)]
    location: Vec<String>,

    /// Address families to include. Defaults to both.
    #[arg(short = 't', long, value_enum, num_args = 1..)]
    address_type: Vec<AddressFamily>,

    /// Output file. Defaults to standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// HTTP request timeout, in seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl From<AddressFamily> for AddressType {
    fn from(family: AddressFamily) -> Self {
        match family {
            AddressFamily::Ipv4 => Self::Ipv4,
            AddressFamily::Ipv6 => Self::Ipv6,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Default,
    Custom(CustomOptions),
}

impl Cli {
    /// Get the HTTP request timeout.
    #[must_use]
    const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    fn init_logging(&self) -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_max_level(self.verbosity.log_level_filter().as_trace())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!("failed to initialize logger: {err}"))
    }

    /// Whether any option selecting the address-set was given.
    fn is_custom(&self) -> bool {
        self.name.is_some()
            || !self.location.is_empty()
            || !self.address_type.is_empty()
            || self.output.is_some()
    }

    fn into_mode(self) -> anyhow::Result<Mode> {
        if !self.is_custom() {
            return Ok(Mode::Default);
        }
        let name = self
            .name
            .ok_or_else(|| anyhow!("--name is required when generating a custom address-set"))?;
        if self.location.is_empty() {
            return Err(anyhow!(
                "--location is required when generating a custom address-set"
            ));
        }
        let address_types: Vec<AddressType> = if self.address_type.is_empty() {
            vec![AddressType::Ipv4, AddressType::Ipv6]
        } else {
            self.address_type.into_iter().map(Into::into).collect()
        };
        Ok(Mode::Custom(CustomOptions::new(
            name,
            Filter::new(self.location, address_types),
            Output::from(self.output),
        )))
    }
}
