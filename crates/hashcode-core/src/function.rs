//! Function values carry no data, only a signature.
//!
//! A function pointer hashes as the byte sequence of its type's name, so two
//! pointers with the same signature hash alike whatever they point to.
//! `std::any::type_name` is stable within a toolchain but its exact text is
//! not guaranteed across compiler releases.

use crate::combine::bytes_hash;
use crate::traits::Hashcode;

/// Hashes a signature given as text.
pub fn signature_hash(signature: &str) -> u64 {
    bytes_hash(signature.as_bytes())
}

macro_rules! impl_fn_pointer {
    ($($arg:ident),*) => {
        impl<R, $($arg),*> Hashcode for fn($($arg),*) -> R {
            fn hashcode(&self) -> u64 {
                signature_hash(std::any::type_name::<Self>())
            }
        }
    };
}

impl_fn_pointer!();
impl_fn_pointer!(A);
impl_fn_pointer!(A, B);
impl_fn_pointer!(A, B, C);
impl_fn_pointer!(A, B, C, D);
impl_fn_pointer!(A, B, C, D, E);
impl_fn_pointer!(A, B, C, D, E, F);
