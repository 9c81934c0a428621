//! Configuration sources, applied in precedence order by `ConfigLoader`.

pub(crate) mod environment;
pub(crate) mod global_file;
pub(crate) mod override_file;
