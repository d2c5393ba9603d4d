use std::fmt;
use std::str::FromStr;

/// The registry whose records are considered. Records from any other registry are ignored.
pub const REGISTRY: &str = "apnic";

/// Field separator of the RIR statistics exchange format.
const SEPARATOR: char = '|';

/// Address family of a delegation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressType {
    /// IPv4 address range. The record's size field is a host count.
    Ipv4,
    /// IPv6 address range. The record's size field is a prefix length.
    Ipv6,
}

impl AddressType {
    /// Name of the address family as it appears in the report.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an [`AddressType`] from anything other than `ipv4` or `ipv6`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown address type '{0}'")]
pub struct UnknownAddressType(String);

impl FromStr for AddressType {
    type Err = UnknownAddressType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ipv4" => Ok(Self::Ipv4),
            "ipv6" => Ok(Self::Ipv6),
            _ => Err(UnknownAddressType(s.to_string())),
        }
    }
}

/// A single address record from a delegation report.
///
/// Only the fields needed to build an address-set are retained. Fields borrow from the report
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    registry: &'a str,
    cc: &'a str,
    address_type: Option<AddressType>,
    start: &'a str,
    value: &'a str,
}

impl<'a> Record<'a> {
    /// Parse a line of the report.
    ///
    /// Returns `None` for comment lines, blank lines, and any line that does not consist of
    /// exactly seven `|`-separated fields. Address type fields other than `ipv4` and `ipv6`
    /// (e.g. `asn`) are accepted, but such records never match a [`Filter`](crate::Filter).
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let fields: Vec<&str> = line.split(SEPARATOR).collect();
        let [registry, cc, address_type, start, value, _date, _status] = fields[..] else {
            return None;
        };
        Some(Self {
            registry,
            cc,
            address_type: address_type.parse().ok(),
            start,
            value,
        })
    }

    /// Registry that allocated the range.
    #[must_use]
    pub const fn registry(&self) -> &'a str {
        self.registry
    }

    /// ISO 3166 country code of the range holder.
    #[must_use]
    pub const fn cc(&self) -> &'a str {
        self.cc
    }

    /// Address family, if the record describes an IP address range.
    #[must_use]
    pub const fn address_type(&self) -> Option<AddressType> {
        self.address_type
    }

    /// First address of the range.
    #[must_use]
    pub const fn start(&self) -> &'a str {
        self.start
    }

    /// Raw size field: a host count for IPv4, a prefix length for IPv6.
    #[must_use]
    pub const fn value(&self) -> &'a str {
        self.value
    }

    /// Whether the record was published by [`REGISTRY`].
    #[must_use]
    pub fn is_from_registry(&self) -> bool {
        self.registry() == REGISTRY
    }
}
