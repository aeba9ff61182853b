pub mod contract;
pub mod envelope;
pub mod leverage;
pub mod tier;

pub use contract::*;
pub use envelope::*;
pub use leverage::*;
pub use tier::*;
