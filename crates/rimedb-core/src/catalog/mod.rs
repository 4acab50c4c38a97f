mod cache;
mod key;
mod lookup;
mod scan;
mod source;
mod store;

pub use cache::*;
pub use key::*;
pub use lookup::*;
pub use scan::*;
pub use source::*;
pub use store::*;
