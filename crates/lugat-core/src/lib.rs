pub mod chapter;
pub mod cleanup;
pub mod normalize;
