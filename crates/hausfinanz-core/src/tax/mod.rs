pub mod health_insurance;
pub mod income_tax;
