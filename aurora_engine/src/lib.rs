//! Engine host for the Aurora script bindings: the module world, the
//! engine function table, and a call-script runner that drives it.

pub mod cli;
pub mod functions;
pub mod game;
pub mod module;
pub mod runner;

pub use game::{Conversation, Game};
pub use module::{Module, ModuleDefinition, ModuleError};
pub use runner::{run_script, CallScript, QueuedAction, RunReport, ScriptError};
