pub mod app;
mod footer;
mod header;
mod needs;
