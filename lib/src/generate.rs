use std::io::Write;

use crate::{cidr::Cidr, error::Error, filter::Filter, record::Record};

/// Lazily select and convert the records of a delegation report.
///
/// Yields one CIDR per record matching `filter`, in the order the records appear in `content`.
/// Comment lines and lines that are not seven-field records are skipped.
pub fn cidrs<'a>(
    content: &'a str,
    filter: &'a Filter,
) -> impl Iterator<Item = Result<Cidr<'a>, Error>> + 'a {
    content
        .lines()
        .filter_map(Record::parse)
        .filter(|record| filter.matches(record))
        .map(|record| record.to_cidr())
}

/// Write an address-set definition named `name` to `w`.
///
/// The definition lists, one per line, the CIDR of every record in `content` that matches
/// `filter`:
///
/// ``` text
/// define chnip4 = {
///     1.0.1.0/24,
///     1.0.2.0/23
/// }
/// ```
///
/// Entries are written as the report is scanned. Returns the number of entries written.
///
/// # Examples
///
/// ```
/// use genip::{generate, AddressType, Filter};
///
/// let report = "apnic|CN|ipv4|1.0.1.0|256|20110414|allocated\n";
/// let filter = Filter::new(["CN"], [AddressType::Ipv4]);
/// let mut out = Vec::new();
/// let count = generate(report, "chnip4", &filter, &mut out)?;
/// assert_eq!(count, 1);
/// assert_eq!(out, b"define chnip4 = {\n    1.0.1.0/24\n}\n");
/// # Ok::<_, genip::Error>(())
/// ```
///
/// # Errors
///
/// An [`Error::HostCount`] is returned if a matching IPv4 record cannot be expressed as a single
/// prefix, and an [`Error::Io`] if writing to `w` fails. Output written before the error is not
/// retracted.
pub fn generate<W: Write + ?Sized>(
    content: &str,
    name: &str,
    filter: &Filter,
    w: &mut W,
) -> Result<usize, Error> {
    tracing::debug!(
        name,
        locations = ?filter.locations(),
        address_types = ?filter.address_types(),
        "generating address-set"
    );
    writeln!(w, "define {name} = {{")?;
    let mut count = 0;
    for cidr in cidrs(content, filter) {
        let cidr = cidr?;
        if count > 0 {
            writeln!(w, ",")?;
        }
        write!(w, "    {cidr}")?;
        count += 1;
    }
    writeln!(w, "\n}}")?;
    if count == 0 {
        tracing::warn!(name, "address-set is empty");
    } else {
        tracing::info!(name, count, "address-set generated");
    }
    Ok(count)
}
