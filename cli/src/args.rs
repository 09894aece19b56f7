mod global;
mod picker;

pub use global::data_dir;
pub use global::GlobalArgs;
pub use picker::FinderArgs;
