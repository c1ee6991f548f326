//! @ai:module:intent Classification oracle adapter: prompt, HTTP client, typed responses
//! @ai:module:layer infrastructure
//! @ai:module:public_api ClassificationOracle, OpenAiOracle, MockOracle, TokenAnalysis, Recommendation, RateLimiter

pub mod client;
pub mod prompt;
pub mod rate_limiter;
pub mod response;

pub use client::{ClassificationOracle, MockOracle, OpenAiOracle};
pub use prompt::build_prompt;
pub use rate_limiter::{RateLimiter, RateLimiterTrait};
pub use response::{parse_analysis, Recommendation, TokenAnalysis};
