//! Hashers for booleans, integers, floats and text.

use std::borrow::Cow;
use std::ffi::{CStr, CString, OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::combine::{bytes_hash, float_hash, int_hash, FALSE_HASH, SEED, TRUE_HASH};
use crate::traits::{Hashcode, KeyText};

impl Hashcode for bool {
    #[inline]
    fn hashcode(&self) -> u64 {
        if *self {
            TRUE_HASH
        } else {
            FALSE_HASH
        }
    }
}

impl KeyText for bool {
    fn key_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }
}

/// Signed integers sign-extend to `i64` and reinterpret as `u64`.
macro_rules! impl_signed {
    ($($t:ty),+) => {
        $(
            impl Hashcode for $t {
                #[inline]
                fn hashcode(&self) -> u64 {
                    int_hash(*self as i64 as u64)
                }
            }

            impl KeyText for $t {
                fn key_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )+
    };
}

macro_rules! impl_unsigned {
    ($($t:ty),+) => {
        $(
            impl Hashcode for $t {
                #[inline]
                fn hashcode(&self) -> u64 {
                    int_hash(*self as u64)
                }
            }

            impl KeyText for $t {
                fn key_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )+
    };
}

// 128-bit values keep only their low 64 bits.
impl_signed!(i8, i16, i32, i64, i128, isize);
impl_unsigned!(u8, u16, u32, u64, u128, usize);

impl Hashcode for char {
    #[inline]
    fn hashcode(&self) -> u64 {
        int_hash(u64::from(*self as u32))
    }
}

impl KeyText for char {
    fn key_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl Hashcode for f64 {
    #[inline]
    fn hashcode(&self) -> u64 {
        float_hash(*self)
    }
}

impl Hashcode for f32 {
    #[inline]
    fn hashcode(&self) -> u64 {
        float_hash(f64::from(*self))
    }
}

impl KeyText for f64 {
    fn key_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl KeyText for f32 {
    fn key_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl Hashcode for str {
    #[inline]
    fn hashcode(&self) -> u64 {
        bytes_hash(self.as_bytes())
    }
}

impl Hashcode for String {
    #[inline]
    fn hashcode(&self) -> u64 {
        bytes_hash(self.as_bytes())
    }
}

impl KeyText for str {
    fn key_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl KeyText for String {
    fn key_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl Hashcode for CStr {
    fn hashcode(&self) -> u64 {
        bytes_hash(self.to_bytes())
    }
}

impl Hashcode for CString {
    fn hashcode(&self) -> u64 {
        bytes_hash(self.as_bytes())
    }
}

impl Hashcode for OsStr {
    fn hashcode(&self) -> u64 {
        bytes_hash(self.as_encoded_bytes())
    }
}

impl Hashcode for OsString {
    fn hashcode(&self) -> u64 {
        self.as_os_str().hashcode()
    }
}

impl Hashcode for Path {
    fn hashcode(&self) -> u64 {
        self.as_os_str().hashcode()
    }
}

impl Hashcode for PathBuf {
    fn hashcode(&self) -> u64 {
        self.as_os_str().hashcode()
    }
}

impl KeyText for Path {
    fn key_text(&self) -> Cow<'_, str> {
        self.to_string_lossy()
    }
}

impl KeyText for PathBuf {
    fn key_text(&self) -> Cow<'_, str> {
        self.to_string_lossy()
    }
}

/// The unit value is an empty sequence.
impl Hashcode for () {
    #[inline]
    fn hashcode(&self) -> u64 {
        SEED
    }
}
