//! Per-type "no such key" values returned by [`CharTrie::find`](super::CharTrie::find).
//!
//! There is deliberately no blanket implementation: calling `find` with a value
//! type that has no sentinel is a compile error. Use
//! [`CharTrie::get`](super::CharTrie::get) for those.

/// A reserved value meaning "no value present".
pub trait Sentinel {
    /// The miss value.
    fn sentinel() -> Self;
}

macro_rules! impl_sentinel {
    ($value:expr => $($ty:ty),* $(,)?) => {
        $(
            impl Sentinel for $ty {
                #[inline]
                fn sentinel() -> Self {
                    $value
                }
            }
        )*
    };
}

impl_sentinel!(-1 => i8, i16, i32, i64, i128, isize);
impl_sentinel!(Self::MAX => u8, u16, u32, u64, u128, usize);
impl_sentinel!(Self::NAN => f32, f64);
impl_sentinel!(String::new() => String);

impl<T> Sentinel for Option<T> {
    #[inline]
    fn sentinel() -> Self {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert_eq!(i32::sentinel(), -1);
        assert_eq!(u8::sentinel(), u8::MAX);
        assert!(f64::sentinel().is_nan());
        assert_eq!(String::sentinel(), "");
        assert_eq!(Option::<u32>::sentinel(), None);
    }
}
