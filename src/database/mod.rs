pub mod connection;

pub use connection::Backend;
