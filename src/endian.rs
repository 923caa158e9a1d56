use core::fmt::{Debug, Formatter, Result};

/// Raw integer as laid out on disk, little-endian regardless of host
pub(crate) trait Primitive: Copy + Default + PartialEq {
    fn from_le(raw: Self) -> Self;
}

macro_rules! primitive {
    ($($type:ty),*) => {
        $(
            impl Primitive for $type {
                #[inline]
                fn from_le(raw: Self) -> Self {
                    <$type>::from_le(raw)
                }
            }
        )*
    };
}

primitive!(u16, u32, u64);

#[derive(Copy, Clone, Default, PartialEq)]
#[repr(transparent)]
pub(crate) struct Little<T: Primitive>(T);

impl<T: Primitive> Little<T> {
    #[inline]
    pub fn to_ne(self) -> T {
        T::from_le(self.0)
    }
}

impl<T: Primitive + Debug> Debug for Little<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.to_ne().fmt(f)
    }
}

#[cfg(test)]
mod test {
    use super::Little;

    #[test]
    fn test_to_ne() {
        let raw: Little<u32> = unsafe { core::mem::transmute([0x20u8, 0x03, 0x00, 0x00]) };
        assert_eq!(raw.to_ne(), 800);
        let raw: Little<u16> = unsafe { core::mem::transmute([0x02u8, 0x00]) };
        assert_eq!(format!("{:?}", raw), "2");
    }
}
