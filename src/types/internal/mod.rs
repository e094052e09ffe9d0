pub mod claims;

pub use claims::{Claims, RoleName};
