pub mod allocation;
pub mod errors;
pub mod numeric;
pub mod position;
pub mod recommendation;

pub use allocation::*;
pub use errors::*;
pub use position::*;
pub use recommendation::*;
