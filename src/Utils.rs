/// logger setup for binaries built on the crate
pub mod logger;
