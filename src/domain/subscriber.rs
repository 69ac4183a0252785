use super::{SubscriberEmail, SubscriberStatus};
use time::OffsetDateTime;
use uuid::Uuid;

/// One mailing list row, as stored.
pub struct Subscriber {
    pub id: Uuid,
    pub email: SubscriberEmail,
    pub status: SubscriberStatus,
    pub subscribed_at: OffsetDateTime,
}
