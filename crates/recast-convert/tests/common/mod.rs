#![allow(dead_code)]

use recast_convert::{ConversionContext, ConversionError, ObjectValue, Value};
use recast_types::{TypeId, TypeRegistry};

/// User types shared by the resolution tests.
pub struct Shapes {
    pub registry: TypeRegistry,
    pub shape: TypeId,
    pub named: TypeId,
    pub labeled: TypeId,
    pub base: TypeId,
    pub square: TypeId,
    pub badge: TypeId,
    pub tag: TypeId,
}

pub fn shapes() -> Shapes {
    let mut registry = TypeRegistry::new();
    let shape = registry.register_interface("Shape", &[]).unwrap();
    let named = registry.register_interface("Named", &[]).unwrap();
    let labeled = registry.register_interface("Labeled", &[]).unwrap();
    let base = registry.register_class("Base", None, &[]).unwrap();
    let square = registry
        .register_class("Square", Some(base), &[shape])
        .unwrap();
    let badge = registry
        .register_class("Badge", None, &[named, labeled])
        .unwrap();
    let tag = registry
        .register_class("Tag", None, &[labeled, named])
        .unwrap();
    Shapes {
        registry,
        shape,
        named,
        labeled,
        base,
        square,
        badge,
        tag,
    }
}

pub fn object(type_id: TypeId) -> Value {
    Value::Object(ObjectValue::new(type_id))
}

/// Leaf that ignores its input and yields `text`.
pub fn constant(
    text: &'static str,
) -> impl Fn(&Value, &ConversionContext) -> Result<Value, ConversionError> + Send + Sync + 'static
{
    move |_: &Value, _: &ConversionContext| Ok(Value::from(text))
}
