pub mod args;
pub mod handlers;
pub mod session;
