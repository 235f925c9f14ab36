pub mod weighted;

pub use weighted::WeightedSelector;
