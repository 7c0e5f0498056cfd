//! C-ABI layout of generated aggregates.
//!
//! Fields are laid out in declaration order, each aligned to its scalar
//! size. The aggregate's alignment is the largest field alignment and its
//! size is rounded up to that alignment. An aggregate with no fields still
//! occupies one byte, as a C++ empty struct does.

use sg_dtype::TypeDescriptor;

const MIN_ALIGN: usize = 1;

/// Round `offset` up to a multiple of `align` (a power of two).
#[must_use]
pub const fn align_to(offset: usize, align: usize) -> usize {
    (offset + align - 1) & !(align - 1)
}

/// Size, alignment and field offsets of one aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLayout {
    size: usize,
    align: usize,
    offsets: Vec<usize>,
}

impl RecordLayout {
    /// Lay out fields of the given descriptors in order.
    #[must_use]
    pub fn compute<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        let mut offset = 0;
        let mut align = MIN_ALIGN;
        let mut offsets = Vec::new();
        for field in fields {
            let field_align = field.base().align();
            align = align.max(field_align);
            let at = align_to(offset, field_align);
            offsets.push(at);
            offset = at + field.size();
        }
        let size = align_to(offset, align).max(1);
        Self {
            size,
            align,
            offsets,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn align(&self) -> usize {
        self.align
    }

    #[must_use]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    #[must_use]
    pub fn offset(&self, field: usize) -> Option<usize> {
        self.offsets.get(field).copied()
    }

    /// `[size, align, offset0, offset1, ...]`, the word sequence a native
    /// `_layout` shim reports.
    #[must_use]
    pub fn to_words(&self) -> Vec<usize> {
        let mut words = Vec::with_capacity(self.offsets.len() + 2);
        words.push(self.size);
        words.push(self.align);
        words.extend_from_slice(&self.offsets);
        words
    }
}

#[cfg(test)]
mod tests;
