/// Raised when a caller breaks the contract of a run, for example by asking for the arguments of a
/// run whose URL list has not been staged yet, or by naming a request mode that does not exist.
///
/// This is a programming error in the caller and is not meant to be recovered from. Abort the run
/// rather than guessing a default.
#[derive(derive_more::Error, derive_more::Display, Debug, Clone, PartialEq, Eq)]
pub struct ContractViolation {
    msg: String,
}

impl ContractViolation {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}
