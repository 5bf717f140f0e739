//! Statistics - running counters and a message log for store activity.
//!
//! Every higher-level component reports into a [`StatisticsCounter`]; the
//! rendered report ([`StatisticsCounter::message_string`]) is plain text meant
//! to be handed to whatever logger the host application uses.

mod counter;
mod message;

pub use counter::StatisticsCounter;
pub use message::LogMessage;
