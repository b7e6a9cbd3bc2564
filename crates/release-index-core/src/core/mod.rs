pub mod error;
pub mod path;
pub mod version;

pub use error::{BoxedCause, IndexError, IndexResult};
pub use version::Version;
