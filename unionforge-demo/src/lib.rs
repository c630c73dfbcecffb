//! # unionforge Demo
//!
//! A job status modelled as a generated named union.
//!
//! [`status::Status`] is generated by the build script from
//! `schemas/status.xml`; its case types live in [`cases`].

pub mod cases;
pub mod status;

pub use cases::{Aborted, Active, Retry};
pub use status::Status;
