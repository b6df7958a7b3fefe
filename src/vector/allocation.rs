use std::{alloc::{self, alloc, realloc, Layout}, mem, ptr::{self, NonNull}};

use log::trace;

use crate::errors::AllocErr;


#[inline]
pub(super) fn infallible<T>(result: Result<T, AllocErr>) -> T {
    match result {
        Ok(x) => x,
        Err(AllocErr::Overflow) => panic!("capacity overflow"),
        Err(AllocErr::Alloc { layout }) => alloc::handle_alloc_error(layout),
    }
}

#[inline]
pub(super) fn layout_array<T>(n: usize) -> Result<Layout, AllocErr> {

    let size = mem::size_of::<T>()
        .checked_mul(n)
        .ok_or(AllocErr::Overflow)?;

    let align = mem::align_of::<T>();

    Layout::from_size_align(size, align).map_err(|_| AllocErr::Overflow)
}

/// Allocates `cap` uninitialized slots.
///
/// Zero-sized types never touch the allocator and get a dangling pointer.
pub(super) fn allocate<T>(cap: usize) -> Result<NonNull<T>, AllocErr> {
    debug_assert!(cap > 0);
    let layout = layout_array::<T>(cap)?;
    if layout.size() == 0 { return Ok(NonNull::dangling()) }

    let ptr = NonNull::new(unsafe { alloc(layout) })
        .ok_or(AllocErr::alloc(layout))?
        .cast();

    trace!("allocated {cap} slots ({} bytes)", layout.size());
    Ok(ptr)
}

/// Releases a block previously returned by [`allocate`] or [`grow`].
///
/// # Safety
///
/// `ptr` must own a block of exactly `cap` slots and must not be used afterwards.
pub(super) unsafe fn deallocate<T>(ptr: NonNull<T>, cap: usize) {
    let layout = infallible(layout_array::<T>(cap));
    if layout.size() == 0 { return }
    unsafe { alloc::dealloc(ptr.as_ptr().cast(), layout) };
}

/// Grows a `cap`-slot block holding `len` live values to `new_cap` slots.
///
/// The allocator is first asked to extend the block with `realloc`. When it
/// refuses, the old block is still intact, so the live prefix is copied into a
/// fresh block by [`relocate`] instead.
///
/// # Safety
///
/// `ptr` must own a block of exactly `cap` slots whose first `len` slots are
/// initialized. On `Ok` the old pointer is dangling.
pub(super) unsafe fn grow<T>(
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    new_cap: usize
) -> Result<NonNull<T>, AllocErr> {
    debug_assert!(len <= cap && cap < new_cap);

    let prev_layout = layout_array::<T>(cap)?;
    let layout = layout_array::<T>(new_cap)?;
    if layout.size() == 0 { return Ok(ptr) }

    let extended = unsafe { realloc(ptr.as_ptr().cast(), prev_layout, layout.size()) };
    match NonNull::new(extended) {
        Some(extended) => {
            trace!("extended buffer from {cap} to {new_cap} slots in place");
            Ok(extended.cast())
        },
        None => unsafe { relocate(ptr, len, cap, new_cap) }
    }
}

/// Moves the first `len` values of a `cap`-slot block into a new `new_cap`-slot
/// block by raw copy, then frees the old block.
///
/// # Safety
///
/// Same contract as [`grow`]. On `Err` nothing has been freed.
pub(super) unsafe fn relocate<T>(
    src: NonNull<T>,
    len: usize,
    cap: usize,
    new_cap: usize
) -> Result<NonNull<T>, AllocErr> {
    let dst = allocate::<T>(new_cap)?;
    unsafe {
        ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), len);
        deallocate(src, cap);
    }

    trace!("relocated {len} values into a fresh block of {new_cap} slots");
    Ok(dst)
}
