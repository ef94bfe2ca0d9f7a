#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod aggregate;
pub mod catalog;
mod constants;
mod registry;
mod result;
mod sample;
mod stats;

pub use aggregate::*;
pub use constants::*;
pub use registry::*;
pub use result::*;
pub use sample::*;
pub use stats::*;
