pub mod record;
pub mod utils;

pub use record::*;
pub use utils::*;
