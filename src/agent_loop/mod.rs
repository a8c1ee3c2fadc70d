//! Agent loop: conversation log, model invoker, and the graph controller
//! that alternates them with tool execution.

pub mod controller;
pub mod conversation;
pub mod events;
pub mod invoker;
pub mod limits;
pub mod types;

pub use controller::{transition, GraphController, RunRequest};
pub use conversation::{should_continue, Conversation};
pub use events::{RunEvent, RunEventPayload, RunEventSink};
pub use invoker::{ModelInvoker, ModelTurn, ProviderInvoker};
pub use limits::RunLimits;
pub use types::{ControllerState, RunId, RunOutput};
