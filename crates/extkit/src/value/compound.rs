//! Compound value types: structs and enums

use indexmap::IndexMap;

use super::Value;

/// A struct instance with named fields.
///
/// Uses IndexMap to keep fields in declaration order, which is also the
/// order they are hashed and compared in when the struct is a map key.
#[derive(Debug, Clone)]
pub struct StructValue {
    /// The struct's type name (e.g., "Point", "Person")
    pub type_name: String,

    /// The struct's fields in declaration order
    /// For tuple structs, keys are "0", "1", "2", etc.
    pub fields: IndexMap<String, Value>,

    /// Whether this is a tuple struct (fields accessed by index)
    pub is_tuple_struct: bool,
}

impl StructValue {
    /// Create a new named struct
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
            is_tuple_struct: false,
        }
    }

    /// Create a new tuple struct from its positional fields
    pub fn tuple(type_name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            is_tuple_struct: true,
        }
    }

    /// Add a field (builder pattern)
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Get a field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a mutable field by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Get a field by index
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.fields.get_index(index).map(|(_, v)| v)
    }

    /// Overwrite an existing field, returning the old value.
    ///
    /// Fields are fixed by the struct's type: an unknown name is left
    /// unset and `None` is returned.
    pub fn set(&mut self, name: &str, value: Value) -> Option<Value> {
        self.fields
            .get_mut(name)
            .map(|slot| std::mem::replace(slot, value))
    }
}

impl PartialEq for StructValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.is_tuple_struct == other.is_tuple_struct
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

/// An enum variant instance: a tagged union.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    /// The enum's type name (e.g., "Shape")
    pub type_name: String,

    /// The variant name (e.g., "Circle")
    pub variant: String,

    /// The variant's data (if any)
    pub data: EnumData,
}

/// The data payload of an enum variant.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumData {
    /// Unit variant: `Empty`
    Unit,

    /// Tuple variant: `Circle(1.0)`
    Tuple(Vec<Value>),

    /// Struct variant: `Rect { w: 1, h: 2 }`
    Struct(IndexMap<String, Value>),
}

impl EnumData {
    /// Payload values in declaration order
    pub fn values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self {
            EnumData::Unit => Box::new(std::iter::empty()),
            EnumData::Tuple(values) => Box::new(values.iter()),
            EnumData::Struct(fields) => Box::new(fields.values()),
        }
    }
}

impl EnumValue {
    /// Create a unit variant
    pub fn unit(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            variant: variant.into(),
            data: EnumData::Unit,
        }
    }

    /// Create a tuple variant
    pub fn tuple(
        type_name: impl Into<String>,
        variant: impl Into<String>,
        values: Vec<Value>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            variant: variant.into(),
            data: EnumData::Tuple(values),
        }
    }

    /// Create a struct variant
    pub fn with_struct(
        type_name: impl Into<String>,
        variant: impl Into<String>,
        fields: IndexMap<String, Value>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            variant: variant.into(),
            data: EnumData::Struct(fields),
        }
    }

    /// Check if this is a specific variant
    pub fn is_variant(&self, variant: &str) -> bool {
        self.variant == variant
    }
}
