//! Method signatures and service interfaces

use std::fmt;
use std::sync::Arc;

use super::types::{display_label, IdlType};

/// Method annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// Side-effect-free call
    Query,
    /// Fire-and-forget call with no reply
    Oneway,
}

impl Annotation {
    /// Parse an annotation keyword; `composite_query` is treated as `query`
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "query" | "composite_query" => Some(Annotation::Query),
            "oneway" => Some(Annotation::Oneway),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Annotation::Query => "query",
            Annotation::Oneway => "oneway",
        }
    }
}

/// Declared name, argument types, return types and annotations of one method
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    pub name: String,
    pub args: Vec<IdlType>,
    /// Optional argument names, aligned with `args`
    pub arg_names: Vec<Option<String>>,
    pub rets: Vec<IdlType>,
    pub annotations: Vec<Annotation>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, args: Vec<IdlType>, rets: Vec<IdlType>) -> Self {
        let arg_names = vec![None; args.len()];
        Self {
            name: name.into(),
            args,
            arg_names,
            rets,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        if !self.annotations.contains(&annotation) {
            self.annotations.push(annotation);
        }
        self
    }

    pub fn is_query(&self) -> bool {
        self.annotations.contains(&Annotation::Query)
    }

    pub fn is_oneway(&self) -> bool {
        self.annotations.contains(&Annotation::Oneway)
    }

    /// Label for argument `index`: its declared name or its type
    pub fn arg_label(&self, index: usize) -> String {
        match (self.arg_names.get(index), self.args.get(index)) {
            (Some(Some(name)), Some(ty)) => format!("{} : {}", name, ty),
            (_, Some(ty)) => ty.to_string(),
            _ => String::new(),
        }
    }
}

fn write_types(f: &mut fmt::Formatter<'_>, types: &[IdlType]) -> fmt::Result {
    write!(f, "(")?;
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", ty)?;
    }
    write!(f, ")")
}

/// Renders the type part: `(nat, nat) -> (nat) query`
impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_types(f, &self.args)?;
        write!(f, " -> ")?;
        write_types(f, &self.rets)?;
        for annotation in &self.annotations {
            write!(f, " {}", annotation.as_str())?;
        }
        Ok(())
    }
}

/// The method list of a service, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceInterface {
    pub name: Option<String>,
    pub methods: Vec<Arc<MethodSignature>>,
}

impl ServiceInterface {
    pub fn new(methods: Vec<MethodSignature>) -> Self {
        Self {
            name: None,
            methods: methods.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<MethodSignature>> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Method name as it would be written in an interface file
    pub fn display_name(method: &MethodSignature) -> String {
        display_label(&method.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_display() {
        let sig = MethodSignature::new("add", vec![IdlType::Nat, IdlType::Nat], vec![IdlType::Nat])
            .with_annotation(Annotation::Query);
        assert_eq!(sig.to_string(), "(nat, nat) -> (nat) query");
        assert!(sig.is_query());
        assert!(!sig.is_oneway());
    }

    #[test]
    fn test_empty_signature_display() {
        let sig = MethodSignature::new("noop", vec![], vec![]);
        assert_eq!(sig.to_string(), "() -> ()");
    }

    #[test]
    fn test_annotation_keywords() {
        assert_eq!(Annotation::from_keyword("query"), Some(Annotation::Query));
        assert_eq!(
            Annotation::from_keyword("composite_query"),
            Some(Annotation::Query)
        );
        assert_eq!(Annotation::from_keyword("oneway"), Some(Annotation::Oneway));
        assert_eq!(Annotation::from_keyword("update"), None);
    }

    #[test]
    fn test_with_annotation_is_idempotent() {
        let sig = MethodSignature::new("m", vec![], vec![])
            .with_annotation(Annotation::Query)
            .with_annotation(Annotation::Query);
        assert_eq!(sig.annotations.len(), 1);
    }

    #[test]
    fn test_interface_lookup() {
        let iface = ServiceInterface::new(vec![
            MethodSignature::new("a", vec![], vec![]),
            MethodSignature::new("b", vec![], vec![]),
        ]);
        assert_eq!(iface.len(), 2);
        assert_eq!(iface.get("b").map(|m| m.name.as_str()), Some("b"));
        assert!(iface.get("c").is_none());
    }

    #[test]
    fn test_arg_label_uses_name_when_present() {
        let mut sig = MethodSignature::new("greet", vec![IdlType::Text], vec![]);
        assert_eq!(sig.arg_label(0), "text");
        sig.arg_names[0] = Some("who".into());
        assert_eq!(sig.arg_label(0), "who : text");
    }
}
