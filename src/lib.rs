pub mod args;
pub mod error;
pub mod mock;
pub mod model;
pub mod normalize;
pub mod orchestrator;
pub mod source;
pub mod status;
pub mod validate;

pub use error::FeedError;
pub use mock::MockProvider;
pub use model::{MatchRecord, MatchStatus, Participant, QueryKind};
pub use orchestrator::{Orchestrator, SourceLists};
