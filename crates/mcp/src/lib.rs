// MCP (Model Context Protocol) front-end for the Lovense cloud adapter
// Exposes the toy-control tools to agent clients over JSON-RPC

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
