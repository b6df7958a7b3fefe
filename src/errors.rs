use std::alloc::Layout;

use thiserror::Error;


/// Returned by the checked accessors when `index` is not inside `[0, len)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("index {index} out of range for vector of size {len}")]
pub struct OutOfRangeError {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Error)]
pub enum AllocErr {
    #[error("capacity overflow")]
    Overflow,
    #[error("memory allocation of {} bytes failed", .layout.size())]
    Alloc { layout: Layout }
}

impl AllocErr {
    #[inline]
    pub(crate) const fn alloc(layout: Layout) -> Self { Self::Alloc { layout } }
}
