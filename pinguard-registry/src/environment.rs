//! Well-known environment identifiers. An `Environment` is just a short
//! string; any non-empty value is legal, these are conveniences only.

pub const DEV: &str = "dev";
pub const UAT: &str = "uat";
pub const PROD: &str = "prod";
