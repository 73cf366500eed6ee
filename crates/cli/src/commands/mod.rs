pub mod run;
pub mod stage;

pub use run::handle_run;
pub use stage::handle_stage;
