pub mod controller;
pub mod events;


pub use controller::{TimerController, TICK_INTERVAL};
pub use events::{TimerEvent, TimerEventType};
