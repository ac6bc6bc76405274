pub mod cashflow;
pub mod depreciation;
pub mod property;
