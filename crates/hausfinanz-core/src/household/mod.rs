pub mod breakdown;
pub mod monthly;
pub mod projection;
pub mod snapshot;
pub mod yearly;
