//! Summing iterators of integers while checking for overflow.
//!
//! The [`CheckedSum`] trait is implemented for iterators of integer types, via those types
//! implementing [`CheckedAddition`]. Distance totals for large expansion factors grow quickly, so
//! every total in this crate is summed through it.

use num_traits::Zero;

/// Iterator extension trait for summing numbers with overflow checking.
pub trait CheckedSum<T> {
    /// Adds numbers in an iterator, checking for overflow.
    /// Returns `None` if overflow occurred.
    fn checked_sum(self) -> Option<T>;
}

impl<T, I> CheckedSum<T> for I
where
    T: CheckedAddition + Zero,
    I: Iterator<Item = T>,
{
    fn checked_sum(mut self) -> Option<T> {
        self.try_fold(T::zero(), |acc, value| acc.checked_addition(&value))
    }
}

/// Numeric type supporting overflow-checked addition.
pub trait CheckedAddition: Sized {
    /// Adds two numbers checking for overflow, returns `None` if overflow occurred.
    fn checked_addition(&self, other: &Self) -> Option<Self>;
}

macro_rules! impl_checked_addition {
    ($($t:ty),*) => {
        $(
            impl CheckedAddition for $t {
                fn checked_addition(&self, other: &Self) -> Option<Self> {
                    <$t>::checked_add(*self, *other)
                }
            }
        )*
    };
}

impl_checked_addition!(u8, u16, u32, u64, u128, usize);
impl_checked_addition!(i8, i16, i32, i64, i128, isize);
