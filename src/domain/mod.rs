mod api_action;
mod bulk_action;
mod subscriber;
mod subscriber_email;
mod subscriber_status;

pub use api_action::ApiAction;
pub use bulk_action::BulkAction;
pub use subscriber::Subscriber;
pub use subscriber_email::SubscriberEmail;
pub use subscriber_status::{StatusFilter, SubscriberStatus};
