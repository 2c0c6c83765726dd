pub mod apply;
pub mod check;
mod context;
pub mod init;

pub use context::CommandContext;
