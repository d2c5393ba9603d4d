use std::fmt;

use crate::{
    error::Error,
    record::{AddressType, Record},
};

/// IPv4 host counts that correspond to a CIDR prefix, indexed by the number of host bits.
///
/// A count of `HOST_COUNTS[k]` covers a `/(32 - k)` prefix.
pub const HOST_COUNTS: [u32; 32] = {
    let mut counts = [0; 32];
    let mut k = 0;
    while k < 32 {
        counts[k] = 1 << k;
        k += 1;
    }
    counts
};

/// Map an IPv4 host count to its prefix length.
///
/// Returns `None` unless `count` is an exact power of two from `2^0` (`/32`) to `2^31` (`/1`).
#[must_use]
pub fn ipv4_prefix_length(count: u64) -> Option<u8> {
    HOST_COUNTS
        .iter()
        .position(|&c| u64::from(c) == count)
        .and_then(|k| u8::try_from(32 - k).ok())
}

/// An address range in `<start>/<prefix-length>` notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cidr<'a> {
    start: &'a str,
    length: PrefixLength<'a>,
}

/// IPv4 lengths are computed; IPv6 lengths are carried verbatim from the report.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PrefixLength<'a> {
    Computed(u8),
    Verbatim(&'a str),
}

impl fmt::Display for PrefixLength<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Computed(length) => write!(f, "{length}"),
            Self::Verbatim(length) => f.write_str(length),
        }
    }
}

impl fmt::Display for Cidr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.length)
    }
}

impl<'a> Record<'a> {
    /// Convert the record to CIDR notation.
    ///
    /// For IPv4 records the size field is a host count, which must be an exact power of two.
    /// For IPv6 records the size field is already a prefix length and is used as-is.
    ///
    /// # Errors
    ///
    /// An [`Error::HostCount`] is returned if an IPv4 host count has no corresponding prefix
    /// length, or if the record is not an IP address record at all.
    pub fn to_cidr(&self) -> Result<Cidr<'a>, Error> {
        let length = match self.address_type() {
            Some(AddressType::Ipv4) => self
                .value()
                .parse()
                .ok()
                .and_then(ipv4_prefix_length)
                .map(PrefixLength::Computed)
                .ok_or_else(|| self.host_count_error())?,
            Some(AddressType::Ipv6) => PrefixLength::Verbatim(self.value()),
            None => return Err(self.host_count_error()),
        };
        Ok(Cidr {
            start: self.start(),
            length,
        })
    }

    fn host_count_error(&self) -> Error {
        Error::HostCount {
            start: self.start().to_string(),
            value: self.value().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_power_of_two_maps_to_prefix() {
        for k in 0..32 {
            assert_eq!(ipv4_prefix_length(1 << k), Some(32 - k), "2^{k}");
        }
    }

    #[test]
    fn host_count_bounds() {
        assert_eq!(ipv4_prefix_length(1), Some(32));
        assert_eq!(ipv4_prefix_length(1 << 31), Some(1));
        assert_eq!(ipv4_prefix_length(0), None);
        assert_eq!(ipv4_prefix_length(1 << 32), None);
    }

    #[test]
    fn host_count_not_power_of_two() {
        assert_eq!(ipv4_prefix_length(3), None);
        assert_eq!(ipv4_prefix_length(768), None);
    }

    #[test]
    fn ipv4_record_to_cidr() {
        let record = Record::parse("apnic|CN|ipv4|1.0.1.0|256|20110414|allocated").unwrap();
        assert_eq!(record.to_cidr().unwrap().to_string(), "1.0.1.0/24");
    }

    #[test]
    fn ipv4_single_host_to_cidr() {
        let record = Record::parse("apnic|CN|ipv4|1.0.1.1|1|20110414|allocated").unwrap();
        assert_eq!(record.to_cidr().unwrap().to_string(), "1.0.1.1/32");
    }

    #[test]
    fn ipv6_record_to_cidr() {
        let record = Record::parse("apnic|CN|ipv6|2400:3c00::|32|20110explo|allocated").unwrap();
        assert_eq!(record.to_cidr().unwrap().to_string(), "2400:3c00::/32");
    }

    #[test]
    fn ipv6_prefix_length_is_verbatim() {
        for length in ["1", "19", "48", "128"] {
            let line = format!("apnic|AU|ipv6|2001:dc0::|{length}|20020801|allocated");
            let record = Record::parse(&line).unwrap();
            assert_eq!(
                record.to_cidr().unwrap().to_string(),
                format!("2001:dc0::/{length}")
            );
        }
    }

    #[test]
    fn ipv4_bad_host_count() {
        for value in ["3", "0", "4294967296", "many"] {
            let line = format!("apnic|CN|ipv4|1.0.1.0|{value}|20110414|allocated");
            let record = Record::parse(&line).unwrap();
            match record.to_cidr() {
                Err(Error::HostCount { start, value: v }) => {
                    assert_eq!(start, "1.0.1.0");
                    assert_eq!(v, value);
                }
                other => panic!("expected host count error, got {other:?}"),
            }
        }
    }

    #[test]
    fn asn_record_has_no_cidr() {
        let record = Record::parse("apnic|JP|asn|173|1|20020801|allocated").unwrap();
        assert!(record.to_cidr().is_err());
    }
}
