pub mod household;
pub mod property;
pub mod stress;
pub mod tax;
