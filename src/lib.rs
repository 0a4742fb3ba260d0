pub mod catalog;
pub mod cli;
pub mod config;
pub mod models;
pub mod storage;
pub mod store;
pub mod utils;

pub use config::Config;
pub use models::{Class, ClassTemplate, Memo, Subject, Unit};
pub use storage::{MemoryStorage, SqliteStorage, Storage};
pub use store::{Mutation, PlannerStore};
pub use utils::Profile;
