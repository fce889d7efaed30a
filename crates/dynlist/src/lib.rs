mod construct;
mod error;
mod list;
mod ops;
mod slice;
mod value;

pub use error::{ErrorKind, ListError};
pub use list::List;
pub use slice::{Positions, Slice, SliceIndices};
pub use value::{Object, SharedList, Value, ValueSource};

/// Builds a [`List`] from values convertible into [`Value`].
///
/// ```
/// use dynlist::{list, Value};
///
/// let items = list![1, "a", (), list![2.5]];
/// assert_eq!(items.len(), 4);
/// assert_eq!(items.to_string(), "[1, 'a', None, [2.5]]");
/// assert!(items.contains(&Value::from("a")));
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::List::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::List::from([$($crate::Value::from($value)),+])
    };
}
