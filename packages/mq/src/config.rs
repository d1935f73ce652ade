// Only publishing happens on this side of the queue, so the broker's own
// option type is re-exported rather than wrapped.

pub type PublishConfig = broccoli_queue::queue::PublishOptions;
