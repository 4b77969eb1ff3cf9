//! Typed indices into the dense arrays backing a graph.
//!
//! Based on the entity references of Cranelift IR: a newtype around a small
//! integer that can only be converted to and from `usize` through
//! [`EntityIndex`].

pub trait EntityIndex: Copy + Eq + Ord + Default {
    /// Creates an index from a `usize`.
    ///
    /// # Panics
    ///
    /// Panics when `index` does not fit the backing integer type.
    fn new(index: usize) -> Self {
        Self::try_new(index).expect("index exceeds the range of the entity type")
    }

    fn try_new(index: usize) -> Option<Self>;
    fn index(self) -> usize;
}

/// Implements [`EntityIndex`] for a newtype around an unsigned integer.
///
/// Based on [`cranelift_entity`'s `entity_impl!`](https://docs.rs/cranelift-entity/0.89.2/cranelift_entity/macro.entity_impl.html)
#[macro_export]
macro_rules! entity_impl {
    ($entity:ident, $backing:ty) => {
        impl $crate::memory::EntityIndex for $entity {
            #[inline(always)]
            fn try_new(ix: usize) -> Option<Self> {
                if ix <= (<$backing>::MAX as usize) || (<$backing>::BITS) > usize::BITS {
                    Some($entity(ix as $backing))
                } else {
                    None
                }
            }

            #[inline(always)]
            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

/// Declares index newtypes with the derives and formatting every index needs.
#[macro_export]
macro_rules! make_entity {
    ($($(#[$attr:meta])* pub struct $name:ident($backing:ty);)*) => {
        $(
            $(#[$attr])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
            pub struct $name($backing);

            $crate::entity_impl!($name, $backing);

            impl ::std::fmt::Display for $name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<$name> for usize {
                #[inline(always)]
                fn from(index: $name) -> usize {
                    $crate::memory::EntityIndex::index(index)
                }
            }
        )*
    };
}
