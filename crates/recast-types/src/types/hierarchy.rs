use rustc_hash::FxHashSet;

use super::defs::TypeId;
use super::registry::TypeRegistry;

impl TypeRegistry {
    /// Returns the supertypes of `ty` in conversion lookup order.
    ///
    /// The walk is breadth-first by hierarchy depth. At each depth the
    /// superclasses come first, then interfaces in the order they were
    /// discovered (declaration order of the types one level down). Every type
    /// appears once and [`TypeId::OBJECT`] is always last. `ty` itself is not
    /// included.
    #[must_use]
    pub fn ancestors(&self, ty: TypeId) -> Vec<TypeId> {
        let mut order = Vec::new();
        let mut seen = FxHashSet::default();
        seen.insert(ty);
        seen.insert(TypeId::OBJECT);

        let mut level = vec![ty];
        while !level.is_empty() {
            let mut classes = Vec::new();
            let mut interfaces = Vec::new();
            for current in &level {
                if let Some(parent) = self.parent(*current) {
                    if seen.insert(parent) {
                        classes.push(parent);
                    }
                }
                for iface in self.interfaces(*current) {
                    if seen.insert(*iface) {
                        interfaces.push(*iface);
                    }
                }
            }
            order.extend_from_slice(&classes);
            order.extend_from_slice(&interfaces);
            level = classes;
            level.extend(interfaces);
        }

        if ty != TypeId::OBJECT {
            order.push(TypeId::OBJECT);
        }
        order
    }

    /// Checks if a value of type `source` can be used where `target` is expected.
    #[must_use]
    pub fn is_assignable(&self, target: TypeId, source: TypeId) -> bool {
        if target == source {
            return true;
        }
        self.ancestors(source).contains(&target)
    }
}

#[cfg(test)]
mod tests {
    use crate::TypeRegistry;
    use crate::TypeId;

    #[test]
    fn numeric_types_walk_number_before_interfaces() {
        let registry = TypeRegistry::new();

        assert_eq!(
            registry.ancestors(TypeId::INT),
            vec![TypeId::NUMBER, TypeId::COMPARABLE, TypeId::OBJECT]
        );
    }

    #[test]
    fn string_interfaces_keep_declaration_order() {
        let registry = TypeRegistry::new();

        assert_eq!(
            registry.ancestors(TypeId::STRING),
            vec![TypeId::CHAR_SEQUENCE, TypeId::COMPARABLE, TypeId::OBJECT]
        );
    }

    #[test]
    fn timestamp_walks_through_date() {
        let registry = TypeRegistry::new();

        assert_eq!(
            registry.ancestors(TypeId::TIMESTAMP),
            vec![TypeId::DATE, TypeId::COMPARABLE, TypeId::OBJECT]
        );
    }

    #[test]
    fn classes_precede_interfaces_at_equal_depth() {
        let mut registry = TypeRegistry::new();
        let shape = registry.register_interface("Shape", &[]).unwrap();
        let base = registry.register_class("Base", None, &[]).unwrap();
        let square = registry.register_class("Square", Some(base), &[shape]).unwrap();

        assert_eq!(
            registry.ancestors(square),
            vec![base, shape, TypeId::OBJECT]
        );
    }

    #[test]
    fn deeper_levels_follow_shallower_ones() {
        let mut registry = TypeRegistry::new();
        let named = registry.register_interface("Named", &[]).unwrap();
        let labeled = registry.register_interface("Labeled", &[named]).unwrap();
        let base = registry.register_class("Base", None, &[named]).unwrap();
        let widget = registry
            .register_class("Widget", Some(base), &[labeled])
            .unwrap();

        // depth 1: Base, Labeled; depth 2: Named (reached from both)
        assert_eq!(
            registry.ancestors(widget),
            vec![base, labeled, named, TypeId::OBJECT]
        );
    }

    #[test]
    fn assignability_follows_ancestors() {
        let mut registry = TypeRegistry::new();
        let color = registry.register_enum("Color", &["RED"], &[]).unwrap();

        assert!(registry.is_assignable(TypeId::NUMBER, TypeId::LONG));
        assert!(registry.is_assignable(TypeId::ENUM, color));
        assert!(registry.is_assignable(TypeId::COMPARABLE, color));
        assert!(registry.is_assignable(TypeId::OBJECT, TypeId::MAP));
        assert!(!registry.is_assignable(TypeId::NUMBER, TypeId::STRING));
        assert!(!registry.is_assignable(TypeId::TIMESTAMP, TypeId::DATE));
    }
}
