pub mod notification;

pub use notification::{
    enrich, type_detail, EnrichedNotification, NotificationType, RawNotification, TypeDetail,
    DEFAULT_NOTIFICATION_TYPE,
};
