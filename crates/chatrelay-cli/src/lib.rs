#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tokio_util as _;
use tracing as _;

pub mod logging;
pub mod parser;

pub use logging::init_logging;
pub use parser::Cli;
