pub mod annotate;
pub mod schemes;
