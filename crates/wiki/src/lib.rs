pub mod client;
pub mod pageviews;
pub mod resolver;
pub mod retry;
pub mod text;
pub mod types;

pub use client::WikiClient;
pub use pageviews::PageviewsClient;
pub use resolver::{Resolution, Resolver};
pub use retry::RetryPolicy;
pub use types::{EntityStats, PageInfo};
