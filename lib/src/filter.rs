use std::collections::HashSet;

use crate::record::{AddressType, Record};

/// Criteria selecting which delegation records contribute to an address-set.
///
/// A record matches if it was published by [`REGISTRY`](crate::REGISTRY), its country code is
/// one of [`Filter::locations`], and its address type is one of [`Filter::address_types`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    locations: HashSet<String>,
    address_types: HashSet<AddressType>,
}

impl Filter {
    /// Construct a new [`Filter`].
    pub fn new<L, T>(locations: L, address_types: T) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        T: IntoIterator<Item = AddressType>,
    {
        Self {
            locations: locations.into_iter().map(Into::into).collect(),
            address_types: address_types.into_iter().collect(),
        }
    }

    /// Accepted country codes.
    #[must_use]
    pub const fn locations(&self) -> &HashSet<String> {
        &self.locations
    }

    /// Accepted address families.
    #[must_use]
    pub const fn address_types(&self) -> &HashSet<AddressType> {
        &self.address_types
    }

    /// Check whether `record` should be included.
    #[must_use]
    pub fn matches(&self, record: &Record<'_>) -> bool {
        record.is_from_registry()
            && self.locations.contains(record.cc())
            && record
                .address_type()
                .is_some_and(|address_type| self.address_types.contains(&address_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cn_ipv4() -> Filter {
        Filter::new(["CN"], [AddressType::Ipv4])
    }

    macro_rules! test_matches {
        ( $( $name:ident { $filter:expr, $line:literal => $result:expr } )* ) => {
            $(
                #[test]
                fn $name() {
                    let record = Record::parse($line).unwrap();
                    assert_eq!($filter.matches(&record), $result);
                }
            )*
        }
    }

    test_matches! {
        matching_record {
            cn_ipv4(), "apnic|CN|ipv4|1.0.1.0|256|20110414|allocated" => true
        }
        other_registry {
            cn_ipv4(), "arin|CN|ipv4|1.0.1.0|256|20110414|allocated" => false
        }
        other_location {
            cn_ipv4(), "apnic|JP|ipv4|1.0.16.0|4096|20110412|allocated" => false
        }
        other_address_type {
            cn_ipv4(), "apnic|CN|ipv6|2400:3c00::|32|20100317|allocated" => false
        }
        asn_record {
            Filter::new(["CN"], [AddressType::Ipv4, AddressType::Ipv6]),
            "apnic|CN|asn|4134|1|20020801|allocated" => false
        }
        several_locations {
            Filter::new(["CN", "HK"], [AddressType::Ipv6]),
            "apnic|HK|ipv6|2400:8800::|32|20100317|allocated" => true
        }
        location_is_case_sensitive {
            cn_ipv4(), "apnic|cn|ipv4|1.0.1.0|256|20110414|allocated" => false
        }
        empty_filter {
            Filter::default(), "apnic|CN|ipv4|1.0.1.0|256|20110414|allocated" => false
        }
    }
}
