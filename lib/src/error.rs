/// Error condition variants.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The delegation report could not be retrieved.
    #[error("failed to fetch delegation report")]
    Fetch(#[from] ureq::Error),
    /// An IPv4 record whose host count is not an exact power of two between `2^0` and `2^31`.
    #[error("unrecognised ipv4 host count '{value}' for range starting at {start}")]
    HostCount {
        /// Start address of the offending record.
        start: String,
        /// Raw value of the record's size field.
        value: String,
    },
    /// Writing to the output sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
