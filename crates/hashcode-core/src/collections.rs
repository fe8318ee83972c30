//! Sequence, mapping and set combiners for std containers.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};

use smallvec::SmallVec;

use crate::combine::Combiner;
use crate::engine::{traverse, HashContext, StructuralHasher};
use crate::error::Result;
use crate::traits::{Hashcode, KeyText};
use crate::value::ValueKind;

/// One entry of an unordered container, ready to be sorted.
#[derive(Debug)]
pub(crate) struct UnorderedEntry<'a> {
    pub(crate) text: Cow<'a, str>,
    pub(crate) key: u64,
    pub(crate) value: Option<u64>,
}

pub(crate) type EntryBuf<'a> = SmallVec<[UnorderedEntry<'a>; 8]>;

/// Folds entries sorted by key text.
///
/// Entries whose text collides are ordered by key hash, then value hash, so
/// the result never depends on the container's enumeration order.
pub(crate) fn fold_unordered(mut entries: EntryBuf<'_>) -> u64 {
    entries.sort_unstable_by(|a, b| {
        a.text
            .cmp(&b.text)
            .then(a.key.cmp(&b.key))
            .then(a.value.cmp(&b.value))
    });

    let mut combiner = Combiner::sequence();
    for entry in entries {
        combiner.push(entry.key);
        if let Some(value) = entry.value {
            combiner.push(value);
        }
    }
    combiner.finish()
}

fn map_hash<'a, K, V, I>(
    entries: I,
    hasher: &StructuralHasher,
    ctx: &mut HashContext,
) -> Result<u64>
where
    K: Hashcode + KeyText + 'a,
    V: Hashcode + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    hasher.enter(ValueKind::Mapping, ctx, |ctx| {
        let mut buf = EntryBuf::new();
        for (k, v) in entries {
            buf.push(UnorderedEntry {
                text: k.key_text(),
                key: hasher.child(k, ctx)?,
                value: Some(hasher.child(v, ctx)?),
            });
        }
        Ok(fold_unordered(buf))
    })
}

fn set_hash<'a, T, I>(elements: I, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64>
where
    T: Hashcode + KeyText + 'a,
    I: Iterator<Item = &'a T>,
{
    hasher.enter(ValueKind::Mapping, ctx, |ctx| {
        let mut buf = EntryBuf::new();
        for e in elements {
            buf.push(UnorderedEntry {
                text: e.key_text(),
                key: hasher.child(e, ctx)?,
                value: None,
            });
        }
        Ok(fold_unordered(buf))
    })
}

fn list_hash<'a, T, I>(items: I, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64>
where
    T: Hashcode + 'a,
    I: Iterator<Item = &'a T>,
{
    hasher.enter(ValueKind::Sequence, ctx, |ctx| {
        let mut combiner = Combiner::sequence();
        for item in items {
            combiner.push(hasher.child(item, ctx)?);
        }
        Ok(combiner.finish())
    })
}

/// Implements `Hashcode` for a container through one traversal helper.
macro_rules! impl_container {
    ($helper:ident, [$($gen:tt)*], $ty:ty, [$($bounds:tt)*]) => {
        impl<$($gen)*> Hashcode for $ty
        where
            $($bounds)*
        {
            fn hashcode(&self) -> u64 {
                traverse(self)
            }

            fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
                $helper(self.iter(), hasher, ctx)
            }
        }
    };
}

impl_container!(list_hash, [T], [T], [T: Hashcode]);
impl_container!(list_hash, [T, const N: usize], [T; N], [T: Hashcode]);
impl_container!(list_hash, [T], Vec<T>, [T: Hashcode]);
impl_container!(list_hash, [T], VecDeque<T>, [T: Hashcode]);
impl_container!(list_hash, [T], LinkedList<T>, [T: Hashcode]);
impl_container!(map_hash, [K, V, S], HashMap<K, V, S>, [K: Hashcode + KeyText, V: Hashcode]);
impl_container!(map_hash, [K, V], BTreeMap<K, V>, [K: Hashcode + KeyText, V: Hashcode]);
impl_container!(set_hash, [T, S], HashSet<T, S>, [T: Hashcode + KeyText]);
impl_container!(set_hash, [T], BTreeSet<T>, [T: Hashcode + KeyText]);

/// Tuples are heterogeneous ordered sequences.
macro_rules! impl_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: Hashcode),+> Hashcode for ($($name,)+) {
            fn hashcode(&self) -> u64 {
                traverse(self)
            }

            fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
                hasher.enter(ValueKind::Sequence, ctx, |ctx| {
                    Ok(Combiner::sequence()
                        $(.field_in(&self.$idx, hasher, ctx)?)+
                        .finish())
                })
            }
        }
    };
}

impl_tuple!(A.0);
impl_tuple!(A.0, B.1);
impl_tuple!(A.0, B.1, C.2);
impl_tuple!(A.0, B.1, C.2, D.3);
impl_tuple!(A.0, B.1, C.2, D.3, E.4);
impl_tuple!(A.0, B.1, C.2, D.3, E.4, F.5);
impl_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6);
impl_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);
