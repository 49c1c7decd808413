use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use thiserror::Error;

use super::defs::{Type, TypeId};

/// Errors raised while declaring user types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A type with the same name already exists.
    #[error("type '{0}' is already registered")]
    DuplicateName(SmolStr),

    /// A referenced type ID is not registered.
    #[error("unknown type id {0}")]
    UnknownType(u32),

    /// A superclass reference points at an interface.
    #[error("'{0}' is not a class")]
    NotAClass(SmolStr),

    /// An implemented/extended type is not an interface.
    #[error("'{0}' is not an interface")]
    NotAnInterface(SmolStr),
}

/// Type registry for built-in and user-declared types.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    /// All types indexed by ID.
    types: FxHashMap<TypeId, Type>,
    /// Name to type ID lookup.
    names: FxHashMap<SmolStr, TypeId>,
    /// Next type ID to assign.
    next_id: u32,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a new type registry with built-in types.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            types: FxHashMap::default(),
            names: FxHashMap::default(),
            next_id: TypeId::USER_TYPES_START,
        };

        registry.register_builtin_types();

        registry
    }

    pub(super) fn register_builtin(&mut self, id: TypeId, ty: Type) {
        self.names.insert(ty.name().clone(), id);
        self.types.insert(id, ty);
    }

    fn register(&mut self, ty: Type) -> Result<TypeId, TypeError> {
        let name = ty.name().clone();
        if self.names.contains_key(&name) || TypeId::from_builtin_name(&name).is_some() {
            return Err(TypeError::DuplicateName(name));
        }
        let id = TypeId(self.next_id);
        self.next_id += 1;
        self.names.insert(name, id);
        self.types.insert(id, ty);
        Ok(id)
    }

    /// Registers a concrete class.
    ///
    /// `parent` defaults to [`TypeId::OBJECT`]; `interfaces` keep their
    /// declaration order, which decides ties during conversion lookup.
    pub fn register_class(
        &mut self,
        name: impl Into<SmolStr>,
        parent: Option<TypeId>,
        interfaces: &[TypeId],
    ) -> Result<TypeId, TypeError> {
        self.register_class_with(name, parent, interfaces, false)
    }

    /// Registers an abstract class.
    pub fn register_abstract_class(
        &mut self,
        name: impl Into<SmolStr>,
        parent: Option<TypeId>,
        interfaces: &[TypeId],
    ) -> Result<TypeId, TypeError> {
        self.register_class_with(name, parent, interfaces, true)
    }

    fn register_class_with(
        &mut self,
        name: impl Into<SmolStr>,
        parent: Option<TypeId>,
        interfaces: &[TypeId],
        is_abstract: bool,
    ) -> Result<TypeId, TypeError> {
        let parent = parent.unwrap_or(TypeId::OBJECT);
        self.require_class(parent)?;
        self.require_interfaces(interfaces)?;
        self.register(Type::Class {
            name: name.into(),
            parent: Some(parent),
            interfaces: interfaces.to_vec(),
            is_abstract,
        })
    }

    /// Registers an interface extending `extends` in declaration order.
    pub fn register_interface(
        &mut self,
        name: impl Into<SmolStr>,
        extends: &[TypeId],
    ) -> Result<TypeId, TypeError> {
        self.require_interfaces(extends)?;
        self.register(Type::Interface {
            name: name.into(),
            extends: extends.to_vec(),
        })
    }

    /// Registers an enum type with its variant names.
    pub fn register_enum(
        &mut self,
        name: impl Into<SmolStr>,
        variants: &[&str],
        interfaces: &[TypeId],
    ) -> Result<TypeId, TypeError> {
        self.require_interfaces(interfaces)?;
        self.register(Type::Enum {
            name: name.into(),
            variants: variants.iter().map(|v| SmolStr::new(v)).collect(),
            interfaces: interfaces.to_vec(),
        })
    }

    fn require_class(&self, id: TypeId) -> Result<(), TypeError> {
        let ty = self.get(id).ok_or(TypeError::UnknownType(id.0))?;
        match ty {
            Type::Class { .. } => Ok(()),
            _ => Err(TypeError::NotAClass(ty.name().clone())),
        }
    }

    fn require_interfaces(&self, ids: &[TypeId]) -> Result<(), TypeError> {
        for id in ids {
            let ty = self.get(*id).ok_or(TypeError::UnknownType(id.0))?;
            if !ty.is_interface() {
                return Err(TypeError::NotAnInterface(ty.name().clone()));
            }
        }
        Ok(())
    }

    /// Gets the name of a type by ID.
    #[must_use]
    pub fn type_name(&self, id: TypeId) -> Option<SmolStr> {
        if let Some(name) = id.builtin_name() {
            return Some(SmolStr::new(name));
        }
        self.types.get(&id).map(|ty| ty.name().clone())
    }

    /// Display name for diagnostics; unknown IDs render as `#<id>`.
    #[must_use]
    pub fn display_name(&self, id: TypeId) -> SmolStr {
        self.type_name(id)
            .unwrap_or_else(|| SmolStr::new(format!("#{}", id.0)))
    }

    /// Gets a type by ID.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&Type> {
        self.types.get(&id)
    }

    /// Returns true if the ID is registered.
    #[must_use]
    pub fn contains(&self, id: TypeId) -> bool {
        self.types.contains_key(&id)
    }

    /// Looks up a type by name.
    ///
    /// User types match exactly; built-in types also match case-insensitively
    /// and by their short aliases.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.names
            .get(name)
            .copied()
            .or_else(|| TypeId::from_builtin_name(name))
    }

    /// Returns the superclass of a type.
    #[must_use]
    pub fn parent(&self, id: TypeId) -> Option<TypeId> {
        self.get(id).and_then(Type::parent)
    }

    /// Returns the direct interfaces of a type in declaration order.
    #[must_use]
    pub fn interfaces(&self, id: TypeId) -> &[TypeId] {
        self.get(id).map_or(&[][..], Type::interfaces)
    }

    /// Returns true if the type is an interface.
    #[must_use]
    pub fn is_interface(&self, id: TypeId) -> bool {
        self.get(id).is_some_and(Type::is_interface)
    }

    /// Returns the variant names of an enum type.
    #[must_use]
    pub fn enum_variants(&self, id: TypeId) -> Option<&[SmolStr]> {
        match self.get(id)? {
            Type::Enum { variants, .. } => Some(variants.as_slice()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup_is_case_insensitive() {
        let registry = TypeRegistry::new();

        assert_eq!(registry.lookup("Integer"), Some(TypeId::INT));
        assert_eq!(registry.lookup("integer"), Some(TypeId::INT));
        assert_eq!(registry.lookup("int"), Some(TypeId::INT));
        assert_eq!(registry.lookup("LocalDate"), Some(TypeId::LOCAL_DATE));
        assert_eq!(registry.lookup("nope"), None);
    }

    #[test]
    fn user_types_receive_fresh_ids() {
        let mut registry = TypeRegistry::new();
        let shape = registry.register_interface("Shape", &[]).unwrap();
        let square = registry
            .register_class("Square", None, &[shape])
            .unwrap();

        assert!(square.0 >= TypeId::USER_TYPES_START);
        assert_eq!(registry.lookup("Square"), Some(square));
        assert_eq!(registry.parent(square), Some(TypeId::OBJECT));
        assert_eq!(registry.interfaces(square), &[shape]);
        assert_eq!(registry.type_name(square).as_deref(), Some("Square"));
    }

    #[test]
    fn declaration_errors() {
        let mut registry = TypeRegistry::new();
        let shape = registry.register_interface("Shape", &[]).unwrap();

        assert_eq!(
            registry.register_interface("Shape", &[]),
            Err(TypeError::DuplicateName("Shape".into()))
        );
        assert_eq!(
            registry.register_class("String", None, &[]),
            Err(TypeError::DuplicateName("String".into()))
        );
        assert_eq!(
            registry.register_class("Circle", Some(shape), &[]),
            Err(TypeError::NotAClass("Shape".into()))
        );
        assert_eq!(
            registry.register_class("Circle", None, &[TypeId::NUMBER]),
            Err(TypeError::NotAnInterface("Number".into()))
        );
        assert_eq!(
            registry.register_interface("Round", &[TypeId(999)]),
            Err(TypeError::UnknownType(999))
        );
    }

    #[test]
    fn enums_extend_enum_root() {
        let mut registry = TypeRegistry::new();
        let color = registry
            .register_enum("Color", &["RED", "GREEN"], &[])
            .unwrap();

        assert_eq!(registry.parent(color), Some(TypeId::ENUM));
        assert_eq!(
            registry.enum_variants(color),
            Some(&[SmolStr::new("RED"), SmolStr::new("GREEN")][..])
        );
    }
}
