pub mod slice;
pub mod stream;
pub mod string;

pub use slice::SliceCursor;
pub use stream::{Encoding, StreamConfig, StreamCursor};
pub use string::StrCursor;
