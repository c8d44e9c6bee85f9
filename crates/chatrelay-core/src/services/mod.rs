//! Application services built on top of the ports.

mod relay;

pub use relay::{DEFAULT_UPSTREAM_ERROR, RelayError, RelayService, interpret_completion};
