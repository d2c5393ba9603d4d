//! Generate firewall address-set definitions from APNIC delegation statistics.
//!
//! The [`Fetcher`] downloads the registry's delegated statistics report. [`generate`] scans the
//! report, selects records with a [`Filter`], and writes each selected range in CIDR notation
//! into a `define NAME = { ... }` block suitable for inclusion in packet-filter rules.
#![doc(html_root_url = "https://docs.rs/genip-lib/0.1.0")]
// clippy lints
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_pub_crate)]
#![allow(clippy::multiple_crate_versions)]
// rustc lints
#![warn(absolute_paths_not_starting_with_crate)]
#![warn(deprecated_in_future)]
#![warn(elided_lifetimes_in_paths)]
#![warn(explicit_outlives_requirements)]
#![warn(keyword_idents)]
#![warn(macro_use_extern_crate)]
#![warn(meta_variable_misuse)]
#![warn(missing_abi)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(noop_method_call)]
#![warn(single_use_lifetimes)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(unsafe_op_in_unsafe_fn)]
#![warn(unstable_features)]
#![warn(unused_crate_dependencies)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]
#![warn(unused_results)]
#![warn(variant_size_differences)]
// docs.rs build config
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

/// Conversion of delegation records to CIDR notation.
pub mod cidr;
pub use self::cidr::Cidr;

mod error;
pub use self::error::Error;

mod fetch;
pub use self::fetch::{Fetcher, APNIC_DELEGATED_LATEST, DEFAULT_TIMEOUT};

mod filter;
pub use self::filter::Filter;

mod generate;
pub use self::generate::{cidrs, generate};

mod record;
pub use self::record::{AddressType, Record, UnknownAddressType, REGISTRY};
