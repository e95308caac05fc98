pub mod pipeline;
pub mod render;
pub mod scan;
