pub mod correlation;
pub mod output;
pub mod pipeline;
pub mod reorder;
pub mod timeseries;
