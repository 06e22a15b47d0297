pub mod client;
pub mod envelope;
pub mod error;
pub mod normalize;
pub mod query;

pub use client::GourmetClient;
pub use error::{ApiError, FailureKind};
pub use normalize::ResultSet;
pub use query::{build_query, id_query, ShopQuery};
