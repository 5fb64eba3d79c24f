pub mod clock;
pub mod metrics;
pub mod notification_fetcher;

pub use clock::{Clock, FixedClock, SystemClock};
pub use self::metrics::{init_metrics, render_metrics};
pub use notification_fetcher::NotificationFetcher;
