use crate::SequenceError;

/// Conversion of a caller-supplied position into a sequence index.
///
/// Unsigned integers always succeed (if they fit in `usize`). Signed integers
/// fail when negative; floats fail unless finite, non-negative and integral.
pub trait IntoIndex: Copy {
    fn into_index(self) -> Result<usize, SequenceError>;
}

impl IntoIndex for usize {
    #[inline]
    fn into_index(self) -> Result<usize, SequenceError> {
        Ok(self)
    }
}

macro_rules! impl_into_index_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoIndex for $t {
                #[inline]
                fn into_index(self) -> Result<usize, SequenceError> {
                    usize::try_from(self).map_err(|_| SequenceError::InvalidIndex(self.to_string()))
                }
            }
        )*
    };
}

impl_into_index_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, isize);

macro_rules! impl_into_index_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoIndex for $t {
                fn into_index(self) -> Result<usize, SequenceError> {
                    // `usize::MAX as $t` rounds up, so the bound is exclusive.
                    if self.is_finite() && self >= 0.0 && self.fract() == 0.0 && self < usize::MAX as $t {
                        Ok(self as usize)
                    } else {
                        Err(SequenceError::InvalidIndex(self.to_string()))
                    }
                }
            }
        )*
    };
}

impl_into_index_float!(f32, f64);
