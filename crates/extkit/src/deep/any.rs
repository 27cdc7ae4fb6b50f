//! Type-erased duplication and identity

use std::any::{Any, TypeId};

use log::trace;

use super::{DeepClone, Identity};

/// Object-safe form of [`DeepClone`] for boxed values of any type.
///
/// `Box<dyn DeepCloneAny>` plays the part of an interface value: its
/// duplicate is a new box holding a duplicate of the same concrete type.
pub trait DeepCloneAny: Any {
    /// Duplicate the held value into a new box.
    fn deep_clone_box(&self) -> Box<dyn DeepCloneAny>;

    /// Upcast for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Name of the concrete type (for diagnostics)
    fn type_name(&self) -> &'static str;
}

impl<T: DeepClone + Any> DeepCloneAny for T {
    fn deep_clone_box(&self) -> Box<dyn DeepCloneAny> {
        Box::new(self.deep_clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl dyn DeepCloneAny {
    /// Whether the held value is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow the held value as a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the held value as a `T`
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl DeepClone for Box<dyn DeepCloneAny> {
    fn deep_clone(&self) -> Self {
        // Deref twice so the held value, not the box, is dispatched on.
        let held: &dyn DeepCloneAny = &**self;
        trace!("deep_clone: interface {}", held.type_name());
        held.deep_clone_box()
    }
}

/// [`Identity`] plus the concrete type, for comparing untyped values.
pub trait AnyIdentity: Identity {
    /// `TypeId` of the concrete type
    fn concrete_type_id(&self) -> TypeId;

    /// Name of the concrete type (for diagnostics)
    fn concrete_type_name(&self) -> &'static str;
}

impl<T: Identity + Any> AnyIdentity for T {
    fn concrete_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn concrete_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}
