pub mod deposit;
pub mod initialize;
pub mod queries;
pub mod register;
pub mod release;
pub mod roles;
pub mod score;
pub mod spend;

pub use deposit::*;
pub use initialize::*;
pub use queries::*;
pub use register::*;
pub use release::*;
pub use roles::*;
pub use score::*;
pub use spend::*;
