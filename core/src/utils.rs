/// Bytes needed to bring `len` up to the next multiple of `align`.
/// Zero when `len` is already aligned.
#[inline]
pub fn padding_for(len: usize, align: usize) -> usize {
    debug_assert!(align > 0, "alignment must be non-zero");
    (align - len % align) % align
}

#[inline]
pub fn align_up(len: usize, align: usize) -> usize {
    len + padding_for(len, align)
}

/// Checked narrowing for 32-bit size fields.
#[inline]
pub fn fit_u32(value: usize) -> Option<u32> {
    u32::try_from(value).ok()
}
