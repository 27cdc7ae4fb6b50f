//! Deep duplication and identity for dynamic values

use std::collections::HashMap;

use log::trace;

use crate::deep::{DeepClone, Identity, Kind};

use super::*;

impl DeepClone for Value {
    fn deep_clone(&self) -> Self {
        trace!("deep_clone: {}", self.kind());
        match self {
            Value::Array(items) => Value::Array(items.iter().map(DeepClone::deep_clone).collect()),
            Value::Interface(inner) => {
                if inner.is_nil() {
                    trace!("deep_clone: nil interface");
                    return self.clone();
                }
                Value::Interface(inner.deep_clone())
            }
            Value::Map(Some(m)) => {
                let src = m.read();
                let mut out = HashMap::with_capacity(src.len());
                for (k, v) in src.iter() {
                    // A duplicated key has the same kind, so it stays hashable.
                    let key = HashableValue::new_unchecked(k.value().deep_clone());
                    out.insert(key, v.deep_clone());
                }
                Value::Map(Some(Shared::new(out)))
            }
            Value::Pointer(Some(p)) => Value::pointer(p.read().deep_clone()),
            Value::Slice(Some(s)) => {
                let src = s.read();
                let mut out = Vec::with_capacity(src.capacity());
                out.extend(src.iter().map(DeepClone::deep_clone));
                Value::Slice(Some(Shared::new(out)))
            }
            Value::Struct(s) => Value::Struct(s.deep_clone()),
            Value::Enum(e) => Value::Enum(e.deep_clone()),
            Value::Queue(Some(q)) => Value::Queue(Some(q.deep_clone())),
            Value::Slice(None) | Value::Map(None) | Value::Pointer(None) | Value::Queue(None) => {
                trace!("deep_clone: nil {}", self.kind());
                self.clone()
            }
            // Scalars, strings and functions: shared or copied as they are
            _ => self.clone(),
        }
    }
}

impl DeepClone for StructValue {
    fn deep_clone(&self) -> Self {
        Self {
            type_name: self.type_name.clone(),
            fields: self
                .fields
                .iter()
                .map(|(name, v)| (name.clone(), v.deep_clone()))
                .collect(),
            is_tuple_struct: self.is_tuple_struct,
        }
    }
}

impl DeepClone for EnumValue {
    fn deep_clone(&self) -> Self {
        let data = match &self.data {
            EnumData::Unit => EnumData::Unit,
            EnumData::Tuple(values) => {
                EnumData::Tuple(values.iter().map(DeepClone::deep_clone).collect())
            }
            EnumData::Struct(fields) => EnumData::Struct(
                fields
                    .iter()
                    .map(|(name, v)| (name.clone(), v.deep_clone()))
                    .collect(),
            ),
        };
        Self {
            type_name: self.type_name.clone(),
            variant: self.variant.clone(),
            data,
        }
    }
}

/// Identity looks through interfaces to the value they hold.
impl Identity for Value {
    fn kind(&self) -> Kind {
        self.concrete().kind()
    }

    fn storage(&self) -> Option<*const ()> {
        match self.concrete() {
            Value::Slice(Some(s)) => Some(s.as_ptr()),
            Value::Map(Some(m)) => Some(m.as_ptr()),
            Value::Pointer(Some(p)) => Some(p.as_ptr()),
            Value::Queue(Some(q)) => Identity::storage(q),
            Value::Func(Some(f)) => Identity::storage(&f.func),
            _ => None,
        }
    }
}
