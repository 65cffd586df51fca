//! Type descriptors of the interface description language

use std::fmt;

/// A field of a record or an arm of a variant
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: String,
    pub ty: IdlType,
}

impl Field {
    pub fn new(label: impl Into<String>, ty: IdlType) -> Self {
        Self {
            label: label.into(),
            ty,
        }
    }
}

/// Type descriptor for one argument or return position
#[derive(Debug, Clone, PartialEq)]
pub enum IdlType {
    Null,
    Bool,
    Nat,
    Nat8,
    Nat16,
    Nat32,
    Nat64,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Text,
    Reserved,
    Opt(Box<IdlType>),
    Vec(Box<IdlType>),
    Record(Vec<Field>),
    Variant(Vec<Field>),
}

impl IdlType {
    /// Look up a primitive type by its keyword
    pub fn primitive(name: &str) -> Option<Self> {
        Some(match name {
            "null" => IdlType::Null,
            "bool" => IdlType::Bool,
            "nat" => IdlType::Nat,
            "nat8" => IdlType::Nat8,
            "nat16" => IdlType::Nat16,
            "nat32" => IdlType::Nat32,
            "nat64" => IdlType::Nat64,
            "int" => IdlType::Int,
            "int8" => IdlType::Int8,
            "int16" => IdlType::Int16,
            "int32" => IdlType::Int32,
            "int64" => IdlType::Int64,
            "float32" => IdlType::Float32,
            "float64" => IdlType::Float64,
            "text" => IdlType::Text,
            "reserved" => IdlType::Reserved,
            _ => return None,
        })
    }

    pub fn opt(inner: IdlType) -> Self {
        IdlType::Opt(Box::new(inner))
    }

    pub fn vec(inner: IdlType) -> Self {
        IdlType::Vec(Box::new(inner))
    }

    /// Build a tuple record (`record { T; T }`) with positional labels
    pub fn tuple(items: Vec<IdlType>) -> Self {
        IdlType::Record(
            items
                .into_iter()
                .enumerate()
                .map(|(i, ty)| Field::new(i.to_string(), ty))
                .collect(),
        )
    }

    pub fn is_nat(&self) -> bool {
        matches!(
            self,
            IdlType::Nat | IdlType::Nat8 | IdlType::Nat16 | IdlType::Nat32 | IdlType::Nat64
        )
    }

    pub fn is_int(&self) -> bool {
        matches!(
            self,
            IdlType::Int | IdlType::Int8 | IdlType::Int16 | IdlType::Int32 | IdlType::Int64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, IdlType::Float32 | IdlType::Float64)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_nat() || self.is_int() || self.is_float()
    }

    /// Largest value a natural type can hold
    pub fn nat_max(&self) -> u128 {
        match self {
            IdlType::Nat8 => u8::MAX as u128,
            IdlType::Nat16 => u16::MAX as u128,
            IdlType::Nat32 => u32::MAX as u128,
            IdlType::Nat64 => u64::MAX as u128,
            _ => u128::MAX,
        }
    }

    /// Inclusive bounds of an integer type
    pub fn int_bounds(&self) -> (i128, i128) {
        match self {
            IdlType::Int8 => (i8::MIN as i128, i8::MAX as i128),
            IdlType::Int16 => (i16::MIN as i128, i16::MAX as i128),
            IdlType::Int32 => (i32::MIN as i128, i32::MAX as i128),
            IdlType::Int64 => (i64::MIN as i128, i64::MAX as i128),
            _ => (i128::MIN, i128::MAX),
        }
    }

    /// Returns true for records whose labels are `0..n` in order
    pub fn is_tuple(&self) -> bool {
        match self {
            IdlType::Record(fields) => is_tuple_labels(fields.iter().map(|f| f.label.as_str())),
            _ => false,
        }
    }
}

/// Positional labels `0, 1, 2, ...` in order
pub(crate) fn is_tuple_labels<'a>(labels: impl Iterator<Item = &'a str>) -> bool {
    let mut any = false;
    for (i, label) in labels.enumerate() {
        any = true;
        if label != i.to_string() {
            return false;
        }
    }
    any
}

/// Render a label, quoting it when it is not a plain identifier
pub(crate) fn display_label(label: &str) -> String {
    let mut chars = label.chars();
    let plain = match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        Some(c) if c.is_ascii_digit() => chars.all(|c| c.is_ascii_digit()),
        _ => false,
    };
    if plain {
        label.to_string()
    } else {
        format!("{:?}", label)
    }
}

impl fmt::Display for IdlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdlType::Null => write!(f, "null"),
            IdlType::Bool => write!(f, "bool"),
            IdlType::Nat => write!(f, "nat"),
            IdlType::Nat8 => write!(f, "nat8"),
            IdlType::Nat16 => write!(f, "nat16"),
            IdlType::Nat32 => write!(f, "nat32"),
            IdlType::Nat64 => write!(f, "nat64"),
            IdlType::Int => write!(f, "int"),
            IdlType::Int8 => write!(f, "int8"),
            IdlType::Int16 => write!(f, "int16"),
            IdlType::Int32 => write!(f, "int32"),
            IdlType::Int64 => write!(f, "int64"),
            IdlType::Float32 => write!(f, "float32"),
            IdlType::Float64 => write!(f, "float64"),
            IdlType::Text => write!(f, "text"),
            IdlType::Reserved => write!(f, "reserved"),
            IdlType::Opt(inner) => write!(f, "opt {}", inner),
            IdlType::Vec(inner) => write!(f, "vec {}", inner),
            IdlType::Record(fields) if fields.is_empty() => write!(f, "record {{}}"),
            IdlType::Record(fields) => {
                let tuple = self.is_tuple();
                write!(f, "record {{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    if tuple {
                        write!(f, "{}", field.ty)?;
                    } else {
                        write!(f, "{} : {}", display_label(&field.label), field.ty)?;
                    }
                }
                write!(f, " }}")
            }
            IdlType::Variant(fields) if fields.is_empty() => write!(f, "variant {{}}"),
            IdlType::Variant(fields) => {
                write!(f, "variant {{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    if field.ty == IdlType::Null {
                        write!(f, "{}", display_label(&field.label))?;
                    } else {
                        write!(f, "{} : {}", display_label(&field.label), field.ty)?;
                    }
                }
                write!(f, " }}")
            }
        }
    }
}
