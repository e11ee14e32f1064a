//! Command implementations

pub mod chat;
pub mod init;
pub mod submit;
pub mod validate;
pub mod watch;
