mod contract;
mod mode;
mod types;

pub mod prelude {
    pub use crate::contract::ContractViolation;
    pub use crate::mode::RequestMode;
    pub use crate::types::WrkResult;
}
