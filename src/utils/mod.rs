pub mod card;
pub mod ratelimit;
pub mod text;

pub use card::{build_card, CardContent, CardStyle};
pub use ratelimit::RateLimiter;
pub use text::{format_baht, truncate_with_ellipsis};
