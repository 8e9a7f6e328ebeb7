pub(crate) mod builder;
pub(crate) mod geometry;
pub(crate) mod instance;
pub(crate) mod renderer;
