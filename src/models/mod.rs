//! Core data models for route selection and trend sampling.

mod mode;
mod route;
mod trend;

pub use mode::*;
pub use route::*;
pub use trend::*;
