pub mod error;
pub mod labels;
pub mod traits;
pub mod types;

pub use error::*;
pub use labels::*;
pub use traits::*;
pub use types::*;
