use std::path::Path;

use anyhow::Context;

use genip::{generate, AddressType, Fetcher, Filter};

use crate::output::Output;

/// Country code used by the default run.
pub const DEFAULT_LOCATION: &str = "CN";

/// Name and address family of each address-set produced by the default run.
///
/// Each set is written to `<name>.ips`.
pub const DEFAULT_SETS: [(&str, AddressType); 2] =
    [("chnip4", AddressType::Ipv4), ("chnip6", AddressType::Ipv6)];

/// Provider of delegation report text.
pub trait ReportSource {
    /// Retrieve the full report.
    ///
    /// # Errors
    ///
    /// Implementations should return an error if the report cannot be retrieved.
    fn report(&self) -> Result<String, genip::Error>;
}

impl ReportSource for Fetcher {
    fn report(&self) -> Result<String, genip::Error> {
        self.fetch()
    }
}

/// Options for a single address-set generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomOptions {
    name: String,
    filter: Filter,
    output: Output,
}

impl CustomOptions {
    /// Construct a new set of [`CustomOptions`].
    #[must_use]
    pub const fn new(name: String, filter: Filter, output: Output) -> Self {
        Self {
            name,
            filter,
            output,
        }
    }

    /// Name of the address-set definition.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record selection criteria.
    #[must_use]
    pub const fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Destination of the definition.
    #[must_use]
    pub const fn output(&self) -> &Output {
        &self.output
    }
}

/// Fetch the report once and write the `chnip4` and `chnip6` address-sets into `dir`.
///
/// # Errors
///
/// Fails if the report cannot be retrieved, a record cannot be converted, or either file cannot
/// be written.
pub fn run_default<S>(source: &S, dir: &Path) -> anyhow::Result<()>
where
    S: ReportSource + ?Sized,
{
    println!(
        "No arguments provided. Using default settings to generate chnip4.ips and chnip6.ips."
    );
    let report = source.report()?;
    for (name, address_type) in DEFAULT_SETS {
        let filter = Filter::new([DEFAULT_LOCATION], [address_type]);
        let output = Output::File(dir.join(format!("{name}.ips")));
        write_definition(&report, name, &filter, &output)?;
    }
    println!("Generated chnip4.ips and chnip6.ips.");
    Ok(())
}

/// Fetch the report once and write a single address-set as described by `options`.
///
/// # Errors
///
/// Fails if the report cannot be retrieved, a record cannot be converted, or the output cannot
/// be written.
pub fn run_custom<S>(source: &S, options: &CustomOptions) -> anyhow::Result<()>
where
    S: ReportSource + ?Sized,
{
    let report = source.report()?;
    write_definition(&report, options.name(), options.filter(), options.output())
}

fn write_definition(
    report: &str,
    name: &str,
    filter: &Filter,
    output: &Output,
) -> anyhow::Result<()> {
    let count = output
        .write_with(|w| generate(report, name, filter, w))
        .with_context(|| format!("failed to write address-set '{name}' to {output}"))?;
    tracing::info!(name, count, %output, "address-set written");
    Ok(())
}
