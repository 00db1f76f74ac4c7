// Messaging - audio requests and UI notifications

pub mod channels;
pub mod notification;

pub use channels::{
    BeepConsumer, BeepProducer, BeepRequest, NotificationConsumer, NotificationProducer,
    create_beep_channel, create_notification_channel,
};
pub use notification::{Notification, NotificationCategory, NotificationLevel};
