mod allocation;
mod cursor;
mod into_iter;

#[cfg(test)]
mod proptests;

use std::{
    fmt,
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut, Index, IndexMut},
    ptr::{self, NonNull},
    slice::{self, SliceIndex},
};

use log::trace;

use crate::errors::{AllocErr, OutOfRangeError};
use allocation::*;

pub use cursor::{
    Access, ConstCursor, ConstReverseCursor, Cursor, Direction, Exclusive, Forward,
    RawCursor, Reverse, ReverseCursor, Shared,
};
pub use into_iter::IntoIter;

/// A contiguous growable array with manually managed storage.
///
/// The buffer is a single heap block of `capacity` slots. Slots `[0, len)` hold
/// live values, the rest is uninitialized room to grow into. An empty vector
/// owns no block at all: `capacity() == 0` exactly when [`data`](Self::data)
/// is null.
///
/// # Examples
///
/// ```
/// use growvec::Vector;
///
/// let mut v = Vector::<i32>::new();
/// v.emplace_back(1);
/// v.emplace_back(2);
/// assert_eq!(v.capacity(), 8);
///
/// v.insert(1, [10, 11]);
/// assert_eq!(v, [1, 10, 11, 2]);
///
/// assert_eq!(v.at(3), Ok(&2));
/// assert!(v.at(4).is_err());
///
/// v.clear();
/// assert_eq!(v.capacity(), 0);
/// ```
///
/// # Growth
///
/// The first append allocates [`INITIAL_CAPACITY`](Self::INITIAL_CAPACITY)
/// slots and a full vector grows by [`GROWTH_FACTOR`](Self::GROWTH_FACTOR).
/// Growth asks the allocator to extend the block with `realloc` and falls
/// back to allocate, copy and free when that is refused. Values are moved by
/// raw copy in both cases, so no element code runs while the buffer moves.
///
/// # Access
///
/// There are three ways to reach an element:
///
/// - [`at`](Self::at) returns an [`OutOfRangeError`] for a bad index.
/// - Slice indexing (`v[i]`) panics for a bad index.
/// - [`at_unchecked`](Self::at_unchecked), [`front`](Self::front),
///   [`back`](Self::back) and the cursors are `unsafe` and only check their
///   bounds in debug builds.
pub struct Vector<T> {
    buf: Option<NonNull<T>>,
    len: usize,
    cap: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for Vector<T> {}
unsafe impl<T: Sync> Sync for Vector<T> {}

/// Something that names the slot an [`insert`](Vector::insert) starts at:
/// a plain index or an exclusive cursor into the receiving vector.
pub trait InsertPosition<T>: sealed::Sealed {
    /// Slot in `vector` before which the values go.
    ///
    /// # Panics
    ///
    /// Panics for a cursor that sits before the first slot, such as `rend`.
    fn insert_index(self, vector: &Vector<T>) -> usize;
}

mod sealed {
    use super::{Direction, Exclusive, RawCursor};

    pub trait Sealed {}
    impl Sealed for usize {}
    impl<T, D: Direction> Sealed for RawCursor<T, D, Exclusive> {}
}

impl<T> InsertPosition<T> for usize {
    #[inline]
    fn insert_index(self, _vector: &Vector<T>) -> usize { self }
}

/// A cursor inserts before the slot it sits on. For reverse cursors this is
/// the raw slot index, so inserting at `rbegin` places the values before the
/// last element.
impl<T, D: Direction> InsertPosition<T> for RawCursor<T, D, Exclusive> {
    #[inline]
    fn insert_index(self, vector: &Vector<T>) -> usize {
        debug_assert!(self.belongs_to(vector), "cursor belongs to a different vector");
        assert!(self.index() >= 0, "Index out of bounds");
        self.index() as usize
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) { self.release(); }
}

impl<T> Default for Vector<T> {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl<T> Deref for Vector<T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target { self.as_slice() }
}

impl<T> DerefMut for Vector<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target { self.as_mut_slice() }
}

impl<T, I: SliceIndex<[T]>> Index<I> for Vector<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(&**self, index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(&mut **self, index)
    }
}

#[cfg(not(tarpaulin_include))]
impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Vector<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<&[U; N]> for Vector<T> {
    fn eq(&self, other: &&[U; N]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for Vector<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U> PartialEq<&[U]> for Vector<T> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U> PartialEq<Vec<U>> for Vector<T> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self { Self::from(self.as_slice()) }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter { IntoIter::new(self) }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        let items = items.into_iter();
        let (lower, _) = items.size_hint();
        if self.cap - self.len < lower {
            let needed = infallible(self.len.checked_add(lower).ok_or(AllocErr::Overflow));
            self.grow_to(needed.max(self.cap.saturating_mul(Self::GROWTH_FACTOR)));
        }
        items.for_each(|item| self.push_back(item));
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut vector = Self::new();
        vector.extend(items);
        vector
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {

    /// Builds a vector holding exactly the values of `arr`, with
    /// `capacity() == N`.
    fn from(arr: [T; N]) -> Self {
        let arr = ManuallyDrop::new(arr);
        let mut vector = Self::with_exact_capacity(N);

        unsafe { ptr::copy_nonoverlapping(
            arr.as_ptr(),
            vector.ptr(),
            N
        )}
        vector.len = N;
        vector
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(items: &[T]) -> Self {
        let mut vector = Self::with_exact_capacity(items.len());
        items.iter().for_each(|item| unsafe { vector.push_unchecked(item.clone()) });
        vector
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(mut vec: Vec<T>) -> Self {
        let len = vec.len();
        let mut vector = Self::with_exact_capacity(len);

        unsafe {
            ptr::copy_nonoverlapping(vec.as_ptr(), vector.ptr(), len);
            vec.set_len(0);
        }
        vector.len = len;
        vector
    }
}

impl<T> From<Vector<T>> for Vec<T> {
    fn from(vector: Vector<T>) -> Self { vector.into_iter().collect() }
}

impl<T> Vector<T> {

    /// Slots allocated by the first append into an empty vector.
    pub const INITIAL_CAPACITY: usize = 8;

    /// Multiplier applied to the capacity when an append finds the vector full.
    pub const GROWTH_FACTOR: usize = 2;

    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Constructs a new, empty `Vector<T>` without allocating.
    ///
    /// # Examples
    /// ```
    /// use growvec::Vector;
    ///
    /// let v = Vector::<i32>::new();
    /// assert_eq!(v.capacity(), 0);
    /// assert!(v.data().is_null());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self { buf: None, len: 0, cap: 0, _marker: PhantomData }
    }

    /// Constructs a vector of `count` default values. Exactly `count` slots
    /// are allocated.
    ///
    /// # Examples
    /// ```
    /// use growvec::Vector;
    ///
    /// let v = Vector::<u8>::with_len(3);
    /// assert_eq!(v, [0, 0, 0]);
    /// assert_eq!(v.capacity(), 3);
    /// ```
    pub fn with_len(count: usize) -> Self
    where
        T: Default,
    {
        let mut vector = Self::with_exact_capacity(count);
        vector.fill_with(count, T::default);
        vector
    }

    /// Constructs a vector of `count` clones of `value`. Exactly `count` slots
    /// are allocated.
    ///
    /// # Examples
    /// ```
    /// use growvec::Vector;
    ///
    /// let v = Vector::from_elem(2, "hi".to_string());
    /// assert_eq!(v, ["hi", "hi"]);
    /// ```
    pub fn from_elem(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut vector = Self::with_exact_capacity(count);
        vector.fill_with(count, || value.clone());
        vector
    }

    fn with_exact_capacity(cap: usize) -> Self {
        let mut vector = Self::new();
        vector.grow_to(cap);
        vector
    }

    /// Number of live elements.
    #[inline(always)]
    pub const fn len(&self) -> usize { self.len }

    /// Same as [`len`](Self::len).
    #[inline(always)]
    pub const fn size(&self) -> usize { self.len }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool { self.len == 0 }

    /// Number of allocated slots, live or not.
    #[inline(always)]
    pub const fn capacity(&self) -> usize { self.cap }

    /// Raw pointer to the first slot, or null while nothing is allocated.
    #[inline]
    pub const fn data(&self) -> *const T {
        match self.buf {
            Some(ptr) => ptr.as_ptr().cast_const(),
            None => ptr::null(),
        }
    }

    /// Mutable counterpart of [`data`](Self::data).
    #[inline]
    pub const fn data_mut(&mut self) -> *mut T {
        match self.buf {
            Some(ptr) => ptr.as_ptr(),
            None => ptr::null_mut(),
        }
    }

    #[inline]
    const fn ptr(&self) -> *mut T {
        match self.buf {
            Some(ptr) => ptr.as_ptr(),
            None => NonNull::dangling().as_ptr(),
        }
    }

    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        // Slots below len are always initialized
        unsafe { slice::from_raw_parts(self.ptr(), self.len) }
    }

    #[inline]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        // Slots below len are always initialized
        unsafe { slice::from_raw_parts_mut(self.ptr(), self.len) }
    }

    /// Constructs a value from `args` directly in the slot after the last
    /// element and returns a reference to it.
    ///
    /// An empty vector first allocates [`INITIAL_CAPACITY`](Self::INITIAL_CAPACITY)
    /// slots, a full one grows by [`GROWTH_FACTOR`](Self::GROWTH_FACTOR).
    /// Growth invalidates every cursor issued for this vector.
    ///
    /// # Examples
    /// ```
    /// use growvec::Vector;
    ///
    /// let mut v = Vector::<String>::new();
    /// v.emplace_back("abc");
    /// v.emplace_back('d').push('e');
    /// assert_eq!(v, ["abc", "de"]);
    /// ```
    ///
    /// # Time Complexity
    ///
    /// Amortized *O*(1).
    #[inline]
    pub fn emplace_back<A>(&mut self, args: A) -> &mut T
    where
        T: From<A>,
    {
        self.emplace_back_with(|| T::from(args))
    }

    /// Like [`emplace_back`](Self::emplace_back), with the value produced by `f`.
    #[inline]
    pub fn emplace_back_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        if self.len == self.cap { self.reserve_for_push(); }

        unsafe {
            let slot = self.ptr().add(self.len);
            slot.write(f());
            self.len += 1;
            &mut *slot
        }
    }

    /// Appends `value` after the last element. See [`emplace_back`](Self::emplace_back).
    #[inline]
    pub fn push_back(&mut self, value: T) {
        self.emplace_back_with(|| value);
    }

    #[inline(always)]
    unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.cap);
        unsafe { self.ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Removes the last element and returns it, or `None` if the vector is empty.
    /// Capacity is kept.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        match self.len == 0 {
            true => None,
            false => unsafe {
                self.len -= 1;
                Some(self.ptr().add(self.len).read())
            }
        }
    }

    /// Adds `additional` slots to the current capacity.
    ///
    /// Unlike [`Vec::reserve`] the argument is not measured against the length:
    /// the capacity afterwards is always `capacity() + additional`.
    ///
    /// # Examples
    /// ```
    /// use growvec::Vector;
    ///
    /// let mut v = Vector::from([1, 2]);
    /// v.reserve(3);
    /// assert_eq!(v.capacity(), 5);
    /// v.reserve(3);
    /// assert_eq!(v.capacity(), 8);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        if additional == 0 { return }
        let new_cap = self.cap.checked_add(additional).ok_or(AllocErr::Overflow);
        self.grow_to(infallible(new_cap));
    }

    /// Sets the length to `new_len`.
    ///
    /// Growing past the capacity reallocates to exactly `new_len` slots and
    /// new slots are filled with `T::default()`. Shrinking drops the trailing
    /// elements and keeps the capacity.
    ///
    /// # Examples
    /// ```
    /// use growvec::Vector;
    ///
    /// let mut v = Vector::from([1, 2]);
    /// v.resize(4);
    /// assert_eq!(v, [1, 2, 0, 0]);
    /// assert_eq!(v.capacity(), 4);
    ///
    /// v.resize(1);
    /// assert_eq!(v, [1]);
    /// assert_eq!(v.capacity(), 4);
    /// ```
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len > self.cap { self.grow_to(new_len); }

        match new_len > self.len {
            true => self.fill_with(new_len, T::default),
            false => self.truncate(new_len),
        }
    }

    /// Drops every element from `len` onwards, in ascending order. Does
    /// nothing if `len` is not below the current length.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len { return }

        let tail = self.len - len;
        self.len = len;
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr().add(len), tail));
        }
    }

    /// Inserts `items` before slot `position`, shifting the elements at and
    /// after it to the right.
    ///
    /// `position` is an index or an exclusive cursor into this vector. If the
    /// vector cannot hold `len() + items.len()` values it first reallocates to
    /// exactly that many slots, which invalidates every cursor issued for it.
    ///
    /// Should `items` yield fewer values than it reported, only those are
    /// inserted.
    ///
    /// # Panics
    ///
    /// Panics if the position is past the end.
    ///
    /// # Examples
    /// ```
    /// use growvec::Vector;
    ///
    /// let mut v = Vector::from([1, 2, 3, 4, 5]);
    /// v.insert(2, [10, 11]);
    /// assert_eq!(v, [1, 2, 10, 11, 3, 4, 5]);
    ///
    /// let end = v.end();
    /// v.insert(end, vec![6]);
    /// assert_eq!(v, [1, 2, 10, 11, 3, 4, 5, 6]);
    /// ```
    ///
    /// # Time Complexity
    ///
    /// *O*(`len - position + items.len()`). The tail is shifted with one
    /// overlapping copy.
    pub fn insert<P, I>(&mut self, position: P, items: I)
    where
        P: InsertPosition<T>,
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let index = position.insert_index(self);
        assert!(index <= self.len, "Index out of bounds");

        let mut items = items.into_iter();
        let distance = items.len();
        if distance == 0 { return }

        let total = infallible(self.len.checked_add(distance).ok_or(AllocErr::Overflow));
        if total > self.cap { self.grow_to(total); }

        let tail = self.len - index;
        unsafe {
            let gap = self.ptr().add(index);
            // The tail is unreachable while the gap is open: a panicking
            // iterator leaks it instead of dropping it twice.
            self.len = index;
            ptr::copy(gap, gap.add(distance), tail);

            let mut written = 0;
            while written < distance {
                let Some(item) = items.next() else { break };
                gap.add(written).write(item);
                written += 1;
            }

            if written < distance {
                ptr::copy(gap.add(distance), gap.add(written), tail);
            }
            self.len = index + written + tail;
        }
    }

    /// Inserts clones of the elements in `[first, last)` before slot `position`.
    ///
    /// The range may come from any vector other than this one.
    ///
    /// # Safety
    ///
    /// Both cursors must be valid for the same vector, with `first` not after
    /// `last`, and every element between them must be live. Passing cursors
    /// into `self` is undefined behavior.
    ///
    /// # Examples
    /// ```
    /// use growvec::Vector;
    ///
    /// let source = Vector::from([10, 11, 12]);
    /// let mut v = Vector::from([1, 2]);
    /// unsafe { v.insert_cursor_range(1, source.cbegin(), source.cend()) };
    /// assert_eq!(v, [1, 10, 11, 12, 2]);
    /// ```
    pub unsafe fn insert_cursor_range<P, D, A>(
        &mut self,
        position: P,
        first: RawCursor<T, D, A>,
        last: RawCursor<T, D, A>
    )
    where
        T: Clone,
        P: InsertPosition<T>,
        D: Direction,
        A: Access,
    {
        let distance = last - first;
        debug_assert!(distance >= 0, "cursor range is reversed");

        let items = (0..distance.max(0))
            .map(|offset| unsafe { (first + offset).get().clone() });
        self.insert(position, items);
    }

    /// Drops every element and releases the buffer. Capacity drops to zero,
    /// so the next append allocates afresh.
    ///
    /// # Examples
    /// ```
    /// use growvec::Vector;
    ///
    /// let mut v = Vector::from([1, 2, 3]);
    /// v.clear();
    /// assert_eq!((v.len(), v.capacity()), (0, 0));
    ///
    /// v.push_back(4);
    /// assert_eq!(v.capacity(), 8);
    /// ```
    pub fn clear(&mut self) {
        let cap = self.cap;
        if self.release() {
            trace!("cleared vector and released {cap} slots");
        }
    }

    /// Drops the live prefix and frees the block. Returns `true` if a block
    /// was held.
    fn release(&mut self) -> bool {
        let len = mem::replace(&mut self.len, 0);
        let cap = mem::replace(&mut self.cap, 0);

        match self.buf.take() {
            Some(ptr) => unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), len));
                deallocate(ptr, cap);
                true
            },
            None => false,
        }
    }

    /// Returns the element at `index`, or an [`OutOfRangeError`] if `index` is
    /// not below [`len`](Self::len).
    ///
    /// # Examples
    /// ```
    /// use growvec::{OutOfRangeError, Vector};
    ///
    /// let v = Vector::from([1, 2, 3]);
    /// assert_eq!(v.at(2), Ok(&3));
    /// assert_eq!(v.at(3), Err(OutOfRangeError { index: 3, len: 3 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, OutOfRangeError> {
        let len = self.len;
        self.as_slice().get(index).ok_or(OutOfRangeError { index, len })
    }

    /// Mutable counterpart of [`at`](Self::at).
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRangeError> {
        let len = self.len;
        self.as_mut_slice().get_mut(index).ok_or(OutOfRangeError { index, len })
    }

    /// Returns the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be below [`len`](Self::len). Debug builds assert it,
    /// release builds do not check at all.
    #[inline(always)]
    pub unsafe fn at_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index {index} out of range for vector of size {}", self.len);
        unsafe { &*self.ptr().add(index) }
    }

    /// Mutable counterpart of [`at_unchecked`](Self::at_unchecked).
    ///
    /// # Safety
    ///
    /// `index` must be below [`len`](Self::len).
    #[inline(always)]
    pub unsafe fn at_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {index} out of range for vector of size {}", self.len);
        unsafe { &mut *self.ptr().add(index) }
    }

    /// First element, unchecked.
    ///
    /// # Safety
    ///
    /// The vector must not be empty.
    #[inline]
    pub unsafe fn front(&self) -> &T {
        debug_assert!(self.len > 0, "front() on an empty vector");
        unsafe { self.at_unchecked(0) }
    }

    /// # Safety
    ///
    /// The vector must not be empty.
    #[inline]
    pub unsafe fn front_mut(&mut self) -> &mut T {
        debug_assert!(self.len > 0, "front_mut() on an empty vector");
        unsafe { self.at_unchecked_mut(0) }
    }

    /// Last element, unchecked.
    ///
    /// # Safety
    ///
    /// The vector must not be empty.
    #[inline]
    pub unsafe fn back(&self) -> &T {
        debug_assert!(self.len > 0, "back() on an empty vector");
        unsafe { self.at_unchecked(self.len.wrapping_sub(1)) }
    }

    /// # Safety
    ///
    /// The vector must not be empty.
    #[inline]
    pub unsafe fn back_mut(&mut self) -> &mut T {
        debug_assert!(self.len > 0, "back_mut() on an empty vector");
        unsafe { self.at_unchecked_mut(self.len.wrapping_sub(1)) }
    }

    /// Exclusive cursor on the first element.
    ///
    /// Cursors read through the buffer held at the time of the call, see
    /// [`RawCursor`] for when they become invalid.
    #[inline]
    pub fn begin(&mut self) -> Cursor<T> { RawCursor::new(self, 0) }

    /// Exclusive cursor one past the last element.
    #[inline]
    pub fn end(&mut self) -> Cursor<T> { RawCursor::new(self, self.len as isize) }

    /// Exclusive reverse cursor on the last element.
    #[inline]
    pub fn rbegin(&mut self) -> ReverseCursor<T> { RawCursor::new(self, self.len as isize - 1) }

    /// Exclusive reverse cursor one before the first element.
    #[inline]
    pub fn rend(&mut self) -> ReverseCursor<T> { RawCursor::new(self, -1) }

    #[inline]
    pub fn cbegin(&self) -> ConstCursor<T> { RawCursor::new(self, 0) }

    #[inline]
    pub fn cend(&self) -> ConstCursor<T> { RawCursor::new(self, self.len as isize) }

    #[inline]
    pub fn crbegin(&self) -> ConstReverseCursor<T> { RawCursor::new(self, self.len as isize - 1) }

    #[inline]
    pub fn crend(&self) -> ConstReverseCursor<T> { RawCursor::new(self, -1) }

    #[cold]
    fn reserve_for_push(&mut self) {
        debug_assert_eq!(self.len, self.cap);
        let new_cap = match self.cap {
            0 => Ok(Self::INITIAL_CAPACITY),
            cap => cap.checked_mul(Self::GROWTH_FACTOR).ok_or(AllocErr::Overflow),
        };
        self.grow_to(infallible(new_cap));
    }

    #[inline]
    fn grow_to(&mut self, new_cap: usize) { infallible(self.try_grow(new_cap)) }

    /// Makes room for `new_cap` slots. Never shrinks.
    fn try_grow(&mut self, new_cap: usize) -> Result<(), AllocErr> {
        debug_assert!(new_cap >= self.len);
        if new_cap <= self.cap { return Ok(()) }

        let ptr = match self.buf {
            None => allocate::<T>(new_cap)?,
            Some(ptr) if Self::IS_ZST => ptr,
            Some(ptr) => unsafe { grow(ptr, self.len, self.cap, new_cap)? },
        };

        self.buf = Some(ptr);
        self.cap = new_cap;
        Ok(())
    }

    /// Writes values from `f` into the uninitialized slots up to `new_len`.
    /// The length follows each write, so a panicking `f` leaves a valid vector.
    fn fill_with<F: FnMut() -> T>(&mut self, new_len: usize, mut f: F) {
        debug_assert!(new_len <= self.cap);
        while self.len < new_len {
            unsafe { self.push_unchecked(f()) };
        }
    }
}
