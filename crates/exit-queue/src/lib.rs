//! Per-token exit priority queues.
//!
//! Exits mature in `(exitable_at, priority)` order.  Each registered token
//! owns one [`ExitQueue`], a binary min-heap that also indexes its entries by
//! priority so a challenged exit can be pulled out without draining the heap.

mod errors;
mod heap;
mod queues;

pub use errors::{ExitQueueError, ExitQueueResult};
pub use heap::{ExitQueue, QueueEntry};
pub use queues::ExitQueues;
