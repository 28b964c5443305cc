pub mod netting;
pub mod positions;
pub mod pruning;
pub mod simplification;
