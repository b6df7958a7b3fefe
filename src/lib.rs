//! A growable contiguous vector that manages its own storage.
//!
//! [`Vector`] owns a single heap block, grows it with `realloc` (falling back to
//! allocate, copy and free), and hands out index based cursors in four
//! flavours: forward or reverse, exclusive or shared.
//!
//! ```
//! use growvec::vector;
//!
//! let mut v = vector![1, 2, 3, 4, 5];
//! v.insert(2, [10, 11]);
//! assert_eq!(v, [1, 2, 10, 11, 3, 4, 5]);
//! ```

mod vector;

pub(crate) mod errors;

pub use errors::OutOfRangeError;
pub use vector::{
    Access, ConstCursor, ConstReverseCursor, Cursor, Direction, Exclusive, Forward,
    InsertPosition, IntoIter, RawCursor, Reverse, ReverseCursor, Shared, Vector,
};

/// Creates a [`Vector`] from a list of values or from `value; count`.
///
/// The list form allocates exactly as many slots as there are values.
///
/// ```
/// use growvec::vector;
///
/// let v = vector![1, 2, 3];
/// assert_eq!(v.capacity(), 3);
///
/// let v = vector![0u8; 4];
/// assert_eq!(v, [0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! vector {
    () => {
        $crate::Vector::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::Vector::from_elem($n, $elem)
    };
    ($($elem:expr),+ $(,)?) => {
        $crate::Vector::from([$($elem),+])
    };
}
