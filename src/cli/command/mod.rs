pub mod fetch;
pub mod info;
pub mod scripts;
pub mod summary;

pub use fetch::fetch;
pub use info::info;
pub use scripts::scripts;
pub use summary::summary;
