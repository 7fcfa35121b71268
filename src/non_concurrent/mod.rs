// nothing in here synchronizes; wrap it in a lock to share it between threads
mod rbtree;

pub use rbtree::{InvariantViolation, RBTree};
