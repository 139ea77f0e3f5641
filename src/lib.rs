pub mod application;
pub mod cli;
pub mod events;
pub mod header;
pub mod pipeline;
pub mod record;
pub mod summary;
pub mod tally;
