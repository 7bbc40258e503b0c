pub mod breakdown;
pub mod listing;
pub mod page;

pub use breakdown::*;
pub use listing::*;
pub use page::*;
