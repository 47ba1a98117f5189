//! Local web inspector serving the expanded entry list

mod html;
mod port;
mod server;

pub use port::bind_inspector_port;
pub use server::{router, start_server};
