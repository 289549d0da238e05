pub mod catalog;
pub mod checkout;
pub mod common;
pub mod order;
pub mod repair;

pub use catalog::*;
pub use checkout::*;
pub use common::*;
pub use order::*;
pub use repair::*;
