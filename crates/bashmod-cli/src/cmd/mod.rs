pub mod categories;
pub mod completions;
pub mod conflicts;
pub mod info;
pub mod install;
pub mod list;
pub mod remove;
pub mod search;
pub mod sources;
pub mod status;
