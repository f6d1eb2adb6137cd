pub mod command;

pub use command::{run, split_args, split_fields};
