//! Display and Debug implementations for Value

use std::fmt;

use super::*;

fn write_list<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a Value>,
    sep: &str,
    debug: bool,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        if debug {
            write!(f, "{:?}", item)?;
        } else {
            write!(f, "{}", item)?;
        }
    }
    Ok(())
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Uint(n) => write!(f, "{}u", n),
            Value::Float(n) => write!(f, "{:?}", n),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::String(s) => write!(f, "{:?}", s.as_ref()),

            Value::Array(items) => {
                write!(f, "[")?;
                write_list(f, items, ", ", true)?;
                write!(f, "]")
            }

            Value::Struct(s) => {
                write!(f, "{} {{ ", s.type_name)?;
                for (i, (name, value)) in s.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {:?}", name, value)?;
                }
                write!(f, " }}")
            }

            Value::Enum(e) => {
                write!(f, "{}::{}", e.type_name, e.variant)?;
                match &e.data {
                    EnumData::Unit => Ok(()),
                    EnumData::Tuple(values) => {
                        write!(f, "(")?;
                        write_list(f, values, ", ", true)?;
                        write!(f, ")")
                    }
                    EnumData::Struct(fields) => {
                        write!(f, " {{ ")?;
                        for (i, (name, value)) in fields.iter().enumerate() {
                            if i > 0 {
                                write!(f, ", ")?;
                            }
                            write!(f, "{}: {:?}", name, value)?;
                        }
                        write!(f, " }}")
                    }
                }
            }

            Value::Interface(inner) => write!(f, "any({:?})", inner),

            Value::Slice(None) => write!(f, "slice(nil)"),
            Value::Slice(Some(s)) => {
                write!(f, "slice[")?;
                write_list(f, s.read().iter(), ", ", true)?;
                write!(f, "]")
            }

            Value::Map(None) => write!(f, "map(nil)"),
            Value::Map(Some(m)) => {
                write!(f, "map{{")?;
                for (i, (k, v)) in m.read().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {:?}", k.value(), v)?;
                }
                write!(f, "}}")
            }

            Value::Pointer(None) => write!(f, "pointer(nil)"),
            Value::Pointer(Some(p)) => write!(f, "&{:?}", &*p.read()),

            Value::Queue(None) => write!(f, "queue(nil)"),
            Value::Queue(Some(q)) => write!(f, "{:?}", q),

            Value::Func(None) => write!(f, "func(nil)"),
            Value::Func(Some(func)) => write!(f, "func {}", func.name),
        }
    }
}

/// Display shows values the way a user would read them: strings unquoted,
/// handles by their contents.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "<nil>"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Uint(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Char(c) => write!(f, "{}", c),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                write_list(f, items, " ", false)?;
                write!(f, "]")
            }
            Value::Slice(s) => {
                write!(f, "[")?;
                if let Some(s) = s {
                    write_list(f, s.read().iter(), " ", false)?;
                }
                write!(f, "]")
            }
            Value::Interface(inner) => write!(f, "{}", inner),
            Value::Pointer(Some(p)) => write!(f, "&{}", &*p.read()),
            Value::Queue(Some(q)) => write!(f, "queue({:?})", q.capacity()),
            _ => write!(f, "{:?}", self),
        }
    }
}
