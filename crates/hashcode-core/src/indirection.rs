//! Reference resolution: optional values, smart pointers and cells.
//!
//! An indirection that refers to nothing hashes to 0. Anything else hashes
//! exactly like the value it refers to, including custom overrides on the
//! referenced type. `Option`, `Box` and the shared pointers count as one
//! level of nesting; `Rc` and `Arc` also mark their allocation as active
//! while it is hashed, so a cycle built through `RefCell` or `Weak` ends at
//! the back reference instead of exhausting the stack.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::{self, Rc};
use std::sync::{self, Arc};

use tracing::debug;

use crate::combine::ABSENT_HASH;
use crate::engine::{traverse, HashContext, StructuralHasher};
use crate::error::Result;
use crate::traits::{Hashcode, KeyText};
use crate::value::ValueKind;

impl<T: Hashcode> Hashcode for Option<T> {
    fn hashcode(&self) -> u64 {
        traverse(self)
    }

    fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
        match self {
            Some(value) => hasher.enter(ValueKind::Reference, ctx, |ctx| hasher.child(value, ctx)),
            None => Ok(ABSENT_HASH),
        }
    }
}

impl<T: KeyText> KeyText for Option<T> {
    fn key_text(&self) -> Cow<'_, str> {
        match self {
            Some(value) => value.key_text(),
            None => Cow::Borrowed(""),
        }
    }
}

impl<T: Hashcode + ?Sized> Hashcode for Box<T> {
    fn hashcode(&self) -> u64 {
        traverse(self)
    }

    fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
        hasher.enter(ValueKind::Reference, ctx, |ctx| hasher.child(&**self, ctx))
    }
}

macro_rules! impl_shared {
    ($($ptr:ident),+) => {
        $(
            impl<T: Hashcode + ?Sized> Hashcode for $ptr<T> {
                fn hashcode(&self) -> u64 {
                    traverse(self)
                }

                fn hashcode_in(
                    &self,
                    hasher: &StructuralHasher,
                    ctx: &mut HashContext,
                ) -> Result<u64> {
                    let address = $ptr::as_ptr(self).cast::<()>();
                    hasher.enter_shared(address, ctx, |ctx| hasher.child(&**self, ctx))
                }
            }
        )+
    };
}

impl_shared!(Rc, Arc);

macro_rules! impl_key_text {
    ($($ptr:ident),+) => {
        $(
            impl<T: KeyText + ?Sized> KeyText for $ptr<T> {
                fn key_text(&self) -> Cow<'_, str> {
                    (**self).key_text()
                }
            }
        )+
    };
}

impl_key_text!(Box, Rc, Arc);

impl<T> Hashcode for Cow<'_, T>
where
    T: Hashcode + ToOwned + ?Sized,
{
    #[inline]
    fn hashcode(&self) -> u64 {
        (**self).hashcode()
    }

    fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
        hasher.child(&**self, ctx)
    }
}

impl<T> KeyText for Cow<'_, T>
where
    T: KeyText + ToOwned + ?Sized,
{
    fn key_text(&self) -> Cow<'_, str> {
        (**self).key_text()
    }
}

/// A dangling weak reference is absent.
impl<T: Hashcode + ?Sized> Hashcode for rc::Weak<T> {
    fn hashcode(&self) -> u64 {
        traverse(self)
    }

    fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
        match self.upgrade() {
            Some(strong) => hasher.child(&strong, ctx),
            None => Ok(ABSENT_HASH),
        }
    }
}

impl<T: Hashcode + ?Sized> Hashcode for sync::Weak<T> {
    fn hashcode(&self) -> u64 {
        traverse(self)
    }

    fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
        match self.upgrade() {
            Some(strong) => hasher.child(&strong, ctx),
            None => Ok(ABSENT_HASH),
        }
    }
}

impl<T: Hashcode + Copy> Hashcode for Cell<T> {
    fn hashcode(&self) -> u64 {
        traverse(self)
    }

    fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
        hasher.child(&self.get(), ctx)
    }
}

/// A cell that is mutably borrowed cannot be read and hashes as absent.
impl<T: Hashcode + ?Sized> Hashcode for RefCell<T> {
    fn hashcode(&self) -> u64 {
        traverse(self)
    }

    fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
        match self.try_borrow() {
            Ok(value) => hasher.child(&*value, ctx),
            Err(_) => {
                debug!(
                    event = "refcell_borrowed",
                    "RefCell is mutably borrowed, hashing as absent"
                );
                Ok(ABSENT_HASH)
            }
        }
    }
}
