//! Codec between the flat logical layout and the kernel's wire format.
//!
//! The kernel reads and writes fixed-width groups ("words") of elements, one
//! word per memory transaction. Packing groups a row-major sequence into
//! words of the configured memory width without reordering; unpacking is the
//! exact inverse, so `unpack(pack(w, x)) == x` for every sequence whose
//! length the width divides.

use crate::element::Element;
use thiserror::Error;

/// Precondition violations of the codec.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    #[error("memory width must be non-zero")]
    ZeroWidth,

    #[error("length {len} is not divisible by memory width {width}")]
    NotDivisible { len: usize, width: usize },
}

/// A logical sequence regrouped into memory-width words.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedBuffer<T> {
    width: usize,
    data: Vec<T>,
}

impl<T: Copy> PackedBuffer<T> {
    /// Packs a row-major sequence into words of `width` elements.
    ///
    /// # Errors
    ///
    /// Fails if `width` is zero or does not divide the sequence length.
    /// Callers are expected to have established divisibility through
    /// [`crate::config::HarnessConfig::validate`].
    pub fn pack(width: usize, source: &[T]) -> Result<Self, LayoutError> {
        Self::check(width, source.len())?;
        Ok(Self {
            width,
            data: source.to_vec(),
        })
    }

    /// Recovers the flat row-major sequence. Exact inverse of [`pack`].
    ///
    /// [`pack`]: PackedBuffer::pack
    #[must_use]
    pub fn unpack(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.data.len());
        for word in self.words() {
            out.extend_from_slice(word);
        }
        out
    }

    /// The memory width this buffer was packed with.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of elements across all words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of memory-width words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.data.len() / self.width
    }

    /// One word of `width` elements.
    ///
    /// # Panics
    ///
    /// Panics if `index >= word_count()`.
    #[must_use]
    pub fn word(&self, index: usize) -> &[T] {
        let start = index * self.width;
        &self.data[start..start + self.width]
    }

    /// Mutable access to one word.
    ///
    /// # Panics
    ///
    /// Panics if `index >= word_count()`.
    pub fn word_mut(&mut self, index: usize) -> &mut [T] {
        let start = index * self.width;
        &mut self.data[start..start + self.width]
    }

    /// Iterates over the words in order.
    pub fn words(&self) -> core::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.width)
    }

    fn check(width: usize, len: usize) -> Result<(), LayoutError> {
        if width == 0 {
            return Err(LayoutError::ZeroWidth);
        }
        if len % width != 0 {
            return Err(LayoutError::NotDivisible { len, width });
        }
        Ok(())
    }
}

impl<T: Element> PackedBuffer<T> {
    /// A zero-filled buffer for the kernel to populate.
    ///
    /// # Errors
    ///
    /// Fails under the same preconditions as [`PackedBuffer::pack`].
    pub fn zeroed(width: usize, len: usize) -> Result<Self, LayoutError> {
        Self::check(width, len)?;
        Ok(Self {
            width,
            data: vec![T::zero(); len],
        })
    }
}
