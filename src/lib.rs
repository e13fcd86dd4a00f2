//! Seedable combined-LCG random engine with shuffling and sampling helpers.
//!
//! Every operation is a synchronous call on one [`Engine`]; identical seeds
//! give identical results. Not suitable where unpredictability matters.

mod bits;
mod engine;
mod error;
mod lazy;
mod normal;
mod seed;
mod sequence;

pub use bits::*;
pub use engine::*;
pub use error::*;
pub use lazy::*;
pub use normal::*;
pub use seed::*;
