pub mod actions;
pub mod state;
pub mod update;

pub use state::App;
pub use update::{run, Shell};
