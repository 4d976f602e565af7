pub mod classify;
pub mod metrics;
pub mod property;
pub mod summary;

pub use classify::{classify, ClassifiedInput};
pub use property::{Coordinates, Property};
pub use summary::{aggregate, PortfolioSummary};
