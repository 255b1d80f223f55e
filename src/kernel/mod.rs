pub mod aggregator;
pub mod event;
pub mod record;
pub mod recorders;
pub mod session;
pub mod transmitter;
