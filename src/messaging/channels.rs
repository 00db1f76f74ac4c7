// Lock-free channels between the UI thread and the audio callback

use crate::messaging::notification::Notification;
use ringbuf::{HeapRb, traits::Split};

/// Request for a train of tone pulses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeepRequest {
    pub pulses: u32,
    pub frequency: f32,
}

pub type BeepProducer = ringbuf::HeapProd<BeepRequest>;
pub type BeepConsumer = ringbuf::HeapCons<BeepRequest>;

pub fn create_beep_channel(capacity: usize) -> (BeepProducer, BeepConsumer) {
    let rb = HeapRb::<BeepRequest>::new(capacity);
    rb.split()
}

pub type NotificationProducer = ringbuf::HeapProd<Notification>;
pub type NotificationConsumer = ringbuf::HeapCons<Notification>;

pub fn create_notification_channel(
    capacity: usize,
) -> (NotificationProducer, NotificationConsumer) {
    let rb = HeapRb::<Notification>::new(capacity);
    rb.split()
}
