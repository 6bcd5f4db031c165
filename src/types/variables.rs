use std::collections::HashMap;
use std::fmt;

use super::operator::FieldType;
use super::value::RawValue;

/// Host capability that supplies variable values by name.
pub trait VariableProvider {
    /// Look up a variable. `None` means the provider does not define it;
    /// `Some(RawValue::Null)` means it is defined but currently null.
    fn lookup(&self, name: &str) -> Option<RawValue>;

    /// The declared type of a variable, if the provider declares one.
    /// Undeclared variables are typed by their raw value.
    fn field_type(&self, _name: &str) -> Option<FieldType> {
        None
    }
}

/// Dictionary of variables keyed by dot-separated paths.
///
/// Supports nested paths like `"user.profile.age"`.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    data: HashMap<String, Entry>,
    declared: HashMap<String, FieldType>,
}

#[derive(Debug, Clone)]
enum Entry {
    Leaf(RawValue),
    Nested(HashMap<String, Entry>),
}

impl Variables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value at a dot-separated path. Creates intermediate nested maps as needed.
    #[must_use]
    pub fn set(mut self, path: &str, value: impl Into<RawValue>) -> Self {
        self.insert(path, value.into());
        self
    }

    /// Declare the type of a variable. Its value is cast to this type on lookup.
    #[must_use]
    pub fn declare(mut self, path: &str, field_type: FieldType) -> Self {
        self.declared.insert(path.to_owned(), field_type);
        self
    }

    pub fn insert(&mut self, path: &str, value: RawValue) {
        let segments: Vec<&str> = path.split('.').collect();
        Self::insert_recursive(&mut self.data, &segments, value);
    }

    /// Look up a value by dot-separated path.
    /// Returns `None` if the path does not exist or points to a nested map.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&RawValue> {
        let segments: Vec<&str> = path.split('.').collect();
        Self::get_recursive(&self.data, &segments)
    }

    fn insert_recursive(map: &mut HashMap<String, Entry>, segments: &[&str], value: RawValue) {
        match segments {
            [] => {}
            [last] => {
                map.insert((*last).to_owned(), Entry::Leaf(value));
            }
            [first, rest @ ..] => {
                let entry = map
                    .entry((*first).to_owned())
                    .or_insert_with(|| Entry::Nested(HashMap::new()));
                match entry {
                    Entry::Nested(nested) => Self::insert_recursive(nested, rest, value),
                    Entry::Leaf(_) => {
                        let mut nested = HashMap::new();
                        Self::insert_recursive(&mut nested, rest, value);
                        *entry = Entry::Nested(nested);
                    }
                }
            }
        }
    }

    fn get_recursive<'a>(map: &'a HashMap<String, Entry>, segments: &[&str]) -> Option<&'a RawValue> {
        match segments {
            [] => None,
            [last] => match map.get(*last)? {
                Entry::Leaf(v) => Some(v),
                Entry::Nested(_) => None,
            },
            [first, rest @ ..] => match map.get(*first)? {
                Entry::Nested(nested) => Self::get_recursive(nested, rest),
                Entry::Leaf(_) => None,
            },
        }
    }
}

impl VariableProvider for Variables {
    fn lookup(&self, name: &str) -> Option<RawValue> {
        self.get(name).cloned()
    }

    fn field_type(&self, name: &str) -> Option<FieldType> {
        self.declared.get(name).copied()
    }
}

type Accessor = Box<dyn Fn() -> RawValue + Send + Sync>;

/// Variables backed by named zero-argument accessors, called on every lookup.
#[derive(Default)]
pub struct Accessors {
    accessors: HashMap<String, (Option<FieldType>, Accessor)>,
}

impl Accessors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an accessor whose result is typed by its raw value.
    #[must_use]
    pub fn register<F>(mut self, name: &str, accessor: F) -> Self
    where
        F: Fn() -> RawValue + Send + Sync + 'static,
    {
        self.accessors
            .insert(name.to_owned(), (None, Box::new(accessor)));
        self
    }

    /// Register an accessor with a declared type.
    #[must_use]
    pub fn register_typed<F>(mut self, name: &str, field_type: FieldType, accessor: F) -> Self
    where
        F: Fn() -> RawValue + Send + Sync + 'static,
    {
        self.accessors
            .insert(name.to_owned(), (Some(field_type), Box::new(accessor)));
        self
    }
}

impl VariableProvider for Accessors {
    fn lookup(&self, name: &str) -> Option<RawValue> {
        self.accessors.get(name).map(|(_, accessor)| accessor())
    }

    fn field_type(&self, name: &str) -> Option<FieldType> {
        self.accessors.get(name).and_then(|(field_type, _)| *field_type)
    }
}

impl fmt::Debug for Accessors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.accessors.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Accessors").field("names", &names).finish()
    }
}

impl VariableProvider for HashMap<String, RawValue> {
    fn lookup(&self, name: &str) -> Option<RawValue> {
        self.get(name).cloned()
    }
}

impl VariableProvider for serde_json::Map<String, serde_json::Value> {
    fn lookup(&self, name: &str) -> Option<RawValue> {
        self.get(name).cloned().map(RawValue::from)
    }
}
