pub(crate) mod document;
pub(crate) mod frames;
pub(crate) mod host;
