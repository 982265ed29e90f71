mod conn;
mod cursor;

pub use conn::{Conn, read_frame};
pub use cursor::{Cursor, WireCapture};
