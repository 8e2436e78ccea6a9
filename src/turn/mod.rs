pub mod dispatcher;
pub mod scheduler;

pub use dispatcher::{do_action, simulate};
pub use scheduler::{Ticket, next_ticket, schedule, unschedule};
