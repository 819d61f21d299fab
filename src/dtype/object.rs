//! Host object references

use std::fmt;

/// Handle to an object living in a host runtime's garbage-collected heap
///
/// List storage never dereferences the handle. Storages of this element type
/// report every handle they hold through [`ListStorage::trace`] so the host
/// collector can keep the objects alive.
///
/// [`ListStorage::trace`]: crate::list::ListStorage::trace
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectRef(u64);

impl ObjectRef {
    /// The host's nil object
    pub const NIL: Self = Self(0);

    /// Wrap a host object id
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The host object id
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Returns true for the nil object
    #[inline]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            write!(f, "ObjectRef(nil)")
        } else {
            write!(f, "ObjectRef({:#x})", self.0)
        }
    }
}
