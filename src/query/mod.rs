mod execute;
mod order_filter;
mod params;
mod party_index;
mod ranker;
mod revenue;
mod scope;

pub use execute::*;
pub use order_filter::*;
pub use params::*;
pub use party_index::*;
pub use ranker::*;
pub use revenue::*;
pub use scope::*;
