pub mod catalog;
pub mod dispatch;
mod schema;

pub use catalog::ToolCatalog;
pub use dispatch::ToolDispatcher;
