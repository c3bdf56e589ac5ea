pub(crate) mod cancel;
pub(crate) mod config;
pub(crate) mod runner;
pub(crate) mod temp;
