//! CLI command implementations

pub mod assess;
pub mod encode;
pub mod inspect;
pub mod json_output;
pub mod serve;

mod reporting;
