pub mod delay;
pub mod driver;
pub mod event;
pub mod observer;
pub mod power;
pub mod state;

pub use delay::{Delay, NoDelay, ThreadSleep};
pub use driver::SchedCore;
pub use event::{EventKind, SimEvent, TickRecord};
pub use power::{ChargePolicy, PowerModel, ProcessorState};
pub use state::{Millis, Priority, ReadySet, SimCtx, Task, TaskId, TaskState};
