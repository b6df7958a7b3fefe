use std::{
    fmt,
    marker::PhantomData,
    ops::{Add, AddAssign, Sub, SubAssign},
    ptr,
};

use super::Vector;


mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Forward {}
    impl Sealed for super::Reverse {}
    impl Sealed for super::Shared {}
    impl Sealed for super::Exclusive {}
}

/// Traversal direction of a cursor.
pub trait Direction: sealed::Sealed {
    /// Change of the logical index when the cursor moves one step forward.
    const STEP: isize;
}

/// Whether a cursor may hand out mutable references.
pub trait Access: sealed::Sealed {}

/// Ascending traversal, from `begin` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forward;

/// Descending traversal, from `rbegin` to `rend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reverse;

/// Read-only cursors, obtained from `&Vector`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shared;

/// Read-write cursors, obtained from `&mut Vector`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exclusive;

impl Direction for Forward { const STEP: isize = 1; }
impl Direction for Reverse { const STEP: isize = -1; }
impl Access for Shared {}
impl Access for Exclusive {}

pub type Cursor<T> = RawCursor<T, Forward, Exclusive>;
pub type ReverseCursor<T> = RawCursor<T, Reverse, Exclusive>;
pub type ConstCursor<T> = RawCursor<T, Forward, Shared>;
pub type ConstReverseCursor<T> = RawCursor<T, Reverse, Shared>;

/// A positional handle into a [`Vector`]: the vector's buffer as it was when
/// the cursor was issued, the vector's address and a logical index.
///
/// Cursors carry no lifetime and no ownership. Moving them around, comparing
/// them and doing arithmetic on them is always safe. The address only serves
/// as the cursor's identity and is never read through. Elements are reached
/// through the buffer pointer, so a cursor stays usable across anything that
/// keeps the buffer in place, such as an `emplace_back` within capacity.
/// Any growth of the vector (`emplace_back` past capacity, `reserve`, `resize`
/// past capacity, `insert` past capacity) and any release of its buffer
/// (`clear`, drop) invalidates every cursor issued for it. Reading through a
/// cursor is therefore `unsafe`.
///
/// Reverse cursors use the same slot indices as forward ones: `rbegin` sits on
/// slot `len - 1` and `rend` on `-1`, one before the first element.
///
/// # Examples
///
/// ```
/// use growvec::vector;
///
/// let v = vector![1, 2, 3];
///
/// let mut seen = Vec::new();
/// let (mut it, end) = (v.crbegin(), v.crend());
/// while it != end {
///     seen.push(unsafe { *it.get() });
///     it.move_next();
/// }
///
/// assert_eq!(seen, [3, 2, 1]);
/// ```
pub struct RawCursor<T, D: Direction, A: Access> {
    owner: *const Vector<T>,
    buf: *mut T,
    index: isize,
    _marker: PhantomData<(fn() -> D, fn() -> A)>,
}

impl<T, D: Direction, A: Access> Clone for RawCursor<T, D, A> {
    #[inline]
    fn clone(&self) -> Self { *self }
}

impl<T, D: Direction, A: Access> Copy for RawCursor<T, D, A> {}

impl<T, D: Direction, A: Access> PartialEq for RawCursor<T, D, A> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.owner, other.owner) && self.index == other.index
    }
}

impl<T, D: Direction, A: Access> Eq for RawCursor<T, D, A> {}

#[cfg(not(tarpaulin_include))]
impl<T, D: Direction, A: Access> fmt::Debug for RawCursor<T, D, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawCursor")
            .field("owner", &self.owner)
            .field("buf", &self.buf)
            .field("index", &self.index)
            .finish()
    }
}

impl<T, D: Direction, A: Access> RawCursor<T, D, A> {

    #[inline]
    pub(super) const fn new(owner: &Vector<T>, index: isize) -> Self {
        Self { owner, buf: owner.ptr(), index, _marker: PhantomData }
    }

    /// The slot this cursor refers to. Reverse cursors report the same slot a
    /// forward cursor would, so `rend` is `-1`.
    #[inline(always)]
    pub const fn index(&self) -> isize { self.index }

    /// Returns `true` if this cursor was issued by `vector`.
    #[inline]
    pub fn belongs_to(&self, vector: &Vector<T>) -> bool {
        ptr::eq(self.owner, vector)
    }

    /// Steps one element in the cursor's direction.
    #[inline]
    pub fn move_next(&mut self) { self.index += D::STEP; }

    /// Steps one element against the cursor's direction.
    #[inline]
    pub fn move_prev(&mut self) { self.index -= D::STEP; }

    /// Returns a reference to the element under the cursor.
    ///
    /// # Safety
    ///
    /// The buffer the cursor was issued over must still be held by its
    /// vector: no growth past capacity and no `clear` or drop since. The
    /// cursor must sit on a live element (`0 <= index < len`). Debug builds
    /// only catch a negative index.
    #[inline]
    pub unsafe fn get(&self) -> &T {
        debug_assert!(self.index >= 0, "cursor at index {} is before the first element", self.index);
        unsafe { &*self.buf.add(self.index as usize) }
    }
}

impl<T, D: Direction> RawCursor<T, D, Exclusive> {

    /// Returns a mutable reference to the element under the cursor.
    ///
    /// # Safety
    ///
    /// Same contract as [`get`](Self::get). In addition no other reference to
    /// the element may be alive while the returned one is used.
    #[inline]
    pub unsafe fn get_mut(&mut self) -> &mut T {
        debug_assert!(self.index >= 0, "cursor at index {} is before the first element", self.index);
        unsafe { &mut *self.buf.add(self.index as usize) }
    }
}

impl<T, D: Direction, A: Access> Add<isize> for RawCursor<T, D, A> {
    type Output = Self;

    #[inline]
    fn add(self, n: isize) -> Self { Self { index: self.index + n * D::STEP, ..self } }
}

impl<T, D: Direction, A: Access> Sub<isize> for RawCursor<T, D, A> {
    type Output = Self;

    #[inline]
    fn sub(self, n: isize) -> Self { Self { index: self.index - n * D::STEP, ..self } }
}

impl<T, D: Direction, A: Access> AddAssign<isize> for RawCursor<T, D, A> {
    #[inline]
    fn add_assign(&mut self, n: isize) { self.index += n * D::STEP; }
}

impl<T, D: Direction, A: Access> SubAssign<isize> for RawCursor<T, D, A> {
    #[inline]
    fn sub_assign(&mut self, n: isize) { self.index -= n * D::STEP; }
}

/// Signed number of steps from `rhs` to `self` in the cursors' direction.
/// Both cursors are expected to come from the same vector.
impl<T, D: Direction, A: Access> Sub for RawCursor<T, D, A> {
    type Output = isize;

    #[inline]
    fn sub(self, rhs: Self) -> isize {
        debug_assert!(ptr::eq(self.owner, rhs.owner), "cursors belong to different vectors");
        (self.index - rhs.index) * D::STEP
    }
}
