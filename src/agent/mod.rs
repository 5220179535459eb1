//! Agent module - perception, decision and action around the term engine.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Classify the problem once (perception)
//! 2. Build context from user preferences, the classification and the tools
//! 3. Call the model with the tool schemas; execute requested tool calls
//!    and feed results back
//! 4. Repeat until the model produces a final answer or the iteration cap

mod agent_loop;
mod perception;
mod prompt;
mod types;

pub use agent_loop::Agent;
pub use perception::Perception;
pub use prompt::build_system_prompt;
pub use types::{AgentOutcome, LogEntryType, PerceivedQuery, ProblemType, TaskLogEntry};
