use num_traits::{PrimInt, Unsigned};

/// Fixed-length vector of `WIDTH`-bit unsigned cells packed into words of `T`.
///
/// A cell may straddle two adjacent words.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct PackedVec<T, const WIDTH: usize> {
    words: Vec<T>,
    len: usize,
}

impl<T, const WIDTH: usize> PackedVec<T, WIDTH>
where
    T: PrimInt + Unsigned + UnboundedShift,
{
    const WORD_BITS: usize = 8 * size_of::<T>();
    const WIDTH_OK: () = assert!(0 < WIDTH && WIDTH <= Self::WORD_BITS);

    pub fn new(len: usize) -> Self {
        // Add a binding to enforce a compile-time assertion.
        #[allow(clippy::let_unit_value)]
        let _ = Self::WIDTH_OK;

        assert!(len > 0, "len must be > 0");
        // One spare word so the last cell can always read its successor.
        let num_words = (WIDTH * len).div_ceil(Self::WORD_BITS) + 1;

        Self {
            words: vec![T::zero(); num_words],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).map(move |index| {
            // SAFETY: `index` is bound by the length of the vec
            unsafe { self.get_unchecked(index) }
        })
    }

    /// Stores `value` at `index` if it exceeds the current cell. Returns
    /// whether the cell changed.
    pub fn update_max(&mut self, index: usize, value: T) -> bool {
        assert!(index < self.len, "index out of bounds");
        // SAFETY: just checked that `index` is in bounds
        unsafe {
            if value > self.get_unchecked(index) {
                self.set_unchecked(index, value);
                return true;
            }
        }
        false
    }

    unsafe fn get_unchecked(&self, index: usize) -> T {
        let (word_index, offset) = Self::word_and_offset(index);
        let low = *self.words.get_unchecked(word_index) >> offset;
        let high = self
            .words
            .get_unchecked(word_index + 1)
            .ushl((Self::WORD_BITS - offset) as u32);
        (low | high) & Self::mask()
    }

    unsafe fn set_unchecked(&mut self, index: usize, value: T) {
        let (word_index, offset) = Self::word_and_offset(index);
        let value = value & Self::mask();
        let spill = (Self::WORD_BITS - offset) as u32;
        {
            let low = self.words.get_unchecked_mut(word_index);
            *low = (*low & !(Self::mask() << offset)) | (value << offset);
        }
        let high = self.words.get_unchecked_mut(word_index + 1);
        *high = (*high & !Self::mask().ushr(spill)) | value.ushr(spill);
    }

    fn mask() -> T {
        T::max_value() >> (Self::WORD_BITS - WIDTH)
    }

    fn word_and_offset(index: usize) -> (usize, usize) {
        (WIDTH * index / Self::WORD_BITS, WIDTH * index % Self::WORD_BITS)
    }
}

/// Shifts that yield zero instead of overflowing when `rhs` reaches the bit
/// width, which happens for cells aligned to a word boundary.
pub(crate) trait UnboundedShift {
    fn ushl(self, rhs: u32) -> Self;
    fn ushr(self, rhs: u32) -> Self;
}

macro_rules! impl_unbounded_shift {
    ($($t:ty),*) => {
        $(
            impl UnboundedShift for $t {
                fn ushl(self, rhs: u32) -> Self {
                    self.unbounded_shl(rhs)
                }

                fn ushr(self, rhs: u32) -> Self {
                    self.unbounded_shr(rhs)
                }
            }
        )*
    };
}

impl_unbounded_shift!(u8, u16, u32, u64, u128, usize);
