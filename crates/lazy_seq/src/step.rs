/// Arithmetic needed to derive a formula when none is given.
///
/// - One seed: `next = prev.advance(one())`.
/// - Two or more seeds: `next = prev.advance(last - second_to_last)`.
///
/// Integer `advance` wraps on overflow; float `advance` is plain addition.
pub trait Step: Clone + Send + Sync + 'static {
    fn one() -> Self;

    /// `self - other`, or `None` if it is not representable.
    fn checked_difference(&self, other: &Self) -> Option<Self>;

    fn advance(&self, step: &Self) -> Self;
}

macro_rules! impl_step_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Step for $t {
                #[inline]
                fn one() -> Self {
                    1
                }

                #[inline]
                fn checked_difference(&self, other: &Self) -> Option<Self> {
                    self.checked_sub(*other)
                }

                #[inline]
                fn advance(&self, step: &Self) -> Self {
                    self.wrapping_add(*step)
                }
            }
        )*
    };
}

macro_rules! impl_step_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Step for $t {
                #[inline]
                fn one() -> Self {
                    1.0
                }

                #[inline]
                fn checked_difference(&self, other: &Self) -> Option<Self> {
                    Some(self - other)
                }

                #[inline]
                fn advance(&self, step: &Self) -> Self {
                    self + step
                }
            }
        )*
    };
}

impl_step_int!(i8, i16, i32, i64, i128, isize);
impl_step_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::Step;

    #[test]
    fn integer_difference_is_checked() {
        assert_eq!(10_i64.checked_difference(&4), Some(6));
        assert_eq!(i64::MAX.checked_difference(&i64::MIN), None);
        assert_eq!(i8::MIN.checked_difference(&1), None);
    }

    #[test]
    fn integer_advance_wraps() {
        assert_eq!(i64::MAX.advance(&1), i64::MIN);
        assert_eq!(i8::MIN.advance(&-1), i8::MAX);
        assert_eq!(5_i32.advance(&-7), -2);
    }

    #[test]
    fn float_arithmetic_is_unchecked() {
        assert_eq!(1.5_f64.checked_difference(&2.0), Some(-0.5));
        assert_eq!(f64::MAX.advance(&f64::MAX), f64::INFINITY);
    }
}
