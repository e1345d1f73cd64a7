pub mod completion;
pub mod gateway_state;
pub mod io_struct;
pub mod server;
