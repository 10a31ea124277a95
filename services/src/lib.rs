pub mod attendance;
pub mod catalog;
pub mod device;
pub mod error;
pub mod report;
pub mod session;
pub mod user;

pub use error::{ServiceError, ServiceResult};

#[cfg(test)]
pub(crate) mod test_support;
