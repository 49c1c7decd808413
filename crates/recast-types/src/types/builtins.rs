use smol_str::SmolStr;

use super::defs::{Type, TypeId};
use super::registry::TypeRegistry;

impl TypeRegistry {
    pub(super) fn register_builtin_types(&mut self) {
        self.register_builtin_class(TypeId::OBJECT, None, &[], true);
        self.register_builtin_class(TypeId::NUMBER, Some(TypeId::OBJECT), &[], true);
        self.register_builtin_class(
            TypeId::ENUM,
            Some(TypeId::OBJECT),
            &[TypeId::COMPARABLE],
            true,
        );

        self.register_builtin_interface(TypeId::CHAR_SEQUENCE);
        self.register_builtin_interface(TypeId::COMPARABLE);
        self.register_builtin_interface(TypeId::TEMPORAL);
        self.register_builtin_interface(TypeId::TEMPORAL_AMOUNT);

        for id in [
            TypeId::BYTE,
            TypeId::SHORT,
            TypeId::INT,
            TypeId::LONG,
            TypeId::FLOAT,
            TypeId::DOUBLE,
            TypeId::BIG_INTEGER,
            TypeId::BIG_DECIMAL,
        ] {
            self.register_builtin_class(id, Some(TypeId::NUMBER), &[TypeId::COMPARABLE], false);
        }

        for id in [TypeId::BOOL, TypeId::CHAR, TypeId::UUID, TypeId::MONTH_DAY] {
            self.register_builtin_class(id, Some(TypeId::OBJECT), &[TypeId::COMPARABLE], false);
        }

        self.register_builtin_class(
            TypeId::STRING,
            Some(TypeId::OBJECT),
            &[TypeId::CHAR_SEQUENCE, TypeId::COMPARABLE],
            false,
        );
        self.register_builtin_class(
            TypeId::DURATION,
            Some(TypeId::OBJECT),
            &[TypeId::TEMPORAL_AMOUNT, TypeId::COMPARABLE],
            false,
        );
        for id in [
            TypeId::INSTANT,
            TypeId::LOCAL_DATE,
            TypeId::LOCAL_TIME,
            TypeId::LOCAL_DATE_TIME,
            TypeId::OFFSET_DATE_TIME,
        ] {
            self.register_builtin_class(
                id,
                Some(TypeId::OBJECT),
                &[TypeId::TEMPORAL, TypeId::COMPARABLE],
                false,
            );
        }
        self.register_builtin_class(TypeId::DATE, Some(TypeId::OBJECT), &[TypeId::COMPARABLE], false);
        // Nanosecond timestamps specialize millisecond dates.
        self.register_builtin_class(TypeId::TIMESTAMP, Some(TypeId::DATE), &[], false);

        self.register_builtin_class(TypeId::MAP, Some(TypeId::OBJECT), &[], false);
        self.register_builtin_class(TypeId::TYPE, Some(TypeId::OBJECT), &[], false);
    }

    fn register_builtin_class(
        &mut self,
        id: TypeId,
        parent: Option<TypeId>,
        interfaces: &[TypeId],
        is_abstract: bool,
    ) {
        let name = builtin_name(id);
        self.register_builtin(
            id,
            Type::Class {
                name,
                parent,
                interfaces: interfaces.to_vec(),
                is_abstract,
            },
        );
    }

    fn register_builtin_interface(&mut self, id: TypeId) {
        let name = builtin_name(id);
        self.register_builtin(
            id,
            Type::Interface {
                name,
                extends: Vec::new(),
            },
        );
    }
}

fn builtin_name(id: TypeId) -> SmolStr {
    SmolStr::new(id.builtin_name().unwrap_or("?"))
}
