pub mod command_handlers;
pub mod dispatcher;
pub mod logging;
pub mod main_types;
