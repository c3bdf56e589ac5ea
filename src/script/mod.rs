pub(crate) mod builder;
pub(crate) mod scene;
pub(crate) mod serialize;
