use std::{iter::FusedIterator, mem::ManuallyDrop, ptr::{self, NonNull}};

use super::{allocation::deallocate, Vector};


/// An iterator that moves out of a [`Vector`].
///
/// Created by [`Vector::into_iter`](IntoIterator::into_iter). The buffer is
/// released once the iterator is dropped, together with any values that were
/// not yielded.
pub struct IntoIter<T> {
    buf: Option<NonNull<T>>,
    cap: usize,
    // Slots in [front, back) are still owned by the iterator
    front: usize,
    back: usize,
}

impl <T> IntoIter<T> {
    #[inline]
    pub(super) fn new(vector: Vector<T>) -> Self {
        let vector = ManuallyDrop::new(vector);
        Self { buf: vector.buf, cap: vector.cap, front: 0, back: vector.len }
    }

    #[inline]
    fn slot(&self, index: usize) -> *mut T {
        match self.buf {
            Some(ptr) => unsafe { ptr.as_ptr().add(index) },
            None => NonNull::dangling().as_ptr(),
        }
    }

    /// The values not yet yielded.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.slot(self.front), self.back - self.front) }
    }
}

impl <T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back { return None }
        let value = unsafe { self.slot(self.front).read() };
        self.front += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl <T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back { return None }
        self.back -= 1;
        Some(unsafe { self.slot(self.back).read() })
    }
}

impl <T> ExactSizeIterator for IntoIter<T> {}

impl <T> FusedIterator for IntoIter<T> {}

impl <T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let rest = ptr::slice_from_raw_parts_mut(self.slot(self.front), self.back - self.front);
        self.front = self.back;
        unsafe { ptr::drop_in_place(rest) };

        if let Some(ptr) = self.buf.take() {
            unsafe { deallocate(ptr, self.cap) };
        }
    }
}
