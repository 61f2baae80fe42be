//! Shared traits and the byte-addressable memory backing the DPU simulator.
//!
//! The simulator is strictly single-threaded and synchronous: every
//! operation here is a pure state transition, there are no timers and no
//! asynchronous I/O.

mod bus;
mod memory;
mod observable;

pub use bus::Bus;
pub use memory::{Memory, MEM_SIZE};
pub use observable::{Observable, Value};
