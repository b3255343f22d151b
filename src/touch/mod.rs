pub mod bounds;
pub mod press;
pub mod sampler;
pub mod swipe;
pub mod types;
