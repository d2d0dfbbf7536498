//! Type-indexed registry of link templates.
//!
//! A registry maps a [`TypeIdentity`] to the [`LinkSet`] registered for it.
//! Registries are populated at startup and read on every injection; the
//! interior lock lets registration race with injection without data races.

use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::identity::{Identified, TypeIdentity};
use crate::options::{LinkOption, LinkSet};
use crate::reflect::Reflect;

/// Process-wide default registry, targeted by [`register`].
static DEFAULT_REGISTRY: LazyLock<LinkRegistry> = LazyLock::new(LinkRegistry::new);

/// Registered link sets, keyed by type identity.
#[derive(Debug, Default)]
pub struct LinkRegistry {
    types: RwLock<HashMap<TypeIdentity, LinkSet>>,
}

impl LinkRegistry {
    /// An empty registry. Independent instances share nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide default registry.
    pub fn global() -> &'static LinkRegistry {
        &DEFAULT_REGISTRY
    }

    /// Register links on the type of `sample`. Only the type matters; a
    /// default instance is enough.
    ///
    /// Replaces any earlier registration for the same type.
    pub fn register<T, I>(&self, sample: &T, options: I)
    where
        T: Reflect + ?Sized,
        I: IntoIterator<Item = LinkOption>,
    {
        self.insert(sample.type_identity(), options);
    }

    /// Register links on `T` without a sample value.
    pub fn register_type<T, I>(&self, options: I)
    where
        T: Identified + ?Sized,
        I: IntoIterator<Item = LinkOption>,
    {
        self.insert(T::identity(), options);
    }

    fn insert<I>(&self, identity: TypeIdentity, options: I)
    where
        I: IntoIterator<Item = LinkOption>,
    {
        let mut links = LinkSet::new();
        for option in options {
            option.apply(&mut links);
        }

        tracing::debug!(
            identity = %identity,
            links = links.len(),
            "registering link set"
        );

        if self.types.write().insert(identity, links).is_some() {
            tracing::debug!(identity = %identity, "replaced earlier link set");
        }
    }

    /// Links registered for `identity`, if any.
    pub fn links_for(&self, identity: &TypeIdentity) -> Option<LinkSet> {
        self.types.read().get(identity).cloned()
    }

    pub fn contains(&self, identity: &TypeIdentity) -> bool {
        self.types.read().contains_key(identity)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    /// Read access for the duration of one injection walk.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, HashMap<TypeIdentity, LinkSet>> {
        self.types.read()
    }
}

/// Register links on the type of `sample` in the default registry.
pub fn register<T, I>(sample: &T, options: I)
where
    T: Reflect + ?Sized,
    I: IntoIterator<Item = LinkOption>,
{
    LinkRegistry::global().register(sample, options);
}

/// Register links on the type of `sample` in `registry`.
pub fn register_on<T, I>(registry: &LinkRegistry, sample: &T, options: I)
where
    T: Reflect + ?Sized,
    I: IntoIterator<Item = LinkOption>,
{
    registry.register(sample, options);
}
