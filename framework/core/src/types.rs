/// Result type used across the wrk driver crates for anything that touches processes or the
/// file system. Compatible with [crate::contract::ContractViolation] so that `?` can be used to
/// propagate contract failures alongside I/O errors.
pub type WrkResult<T> = anyhow::Result<T>;
