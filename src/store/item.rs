//! Items, attribute values, and the typed condition/update expressions
//! evaluated by a store's conditional update.

use std::collections::HashMap;

/// A single attribute value. The store is schemaless; every attribute is a
/// string, a signed integer, or a boolean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    S(String),
    N(i64),
    Bool(bool),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::S(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::N(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Attribute map of a single item.
pub type Attrs = HashMap<String, AttrValue>;

/// Composite key: partition key groups items belonging to one resource,
/// sort key distinguishes them within the partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub pk: String,
    pub sk: String,
}

impl ItemKey {
    pub fn new(pk: impl Into<String>, sk: impl Into<String>) -> Self {
        ItemKey {
            pk: pk.into(),
            sk: sk.into(),
        }
    }
}

/// A stored item: key plus attribute map.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub key: ItemKey,
    pub attrs: Attrs,
}

impl Item {
    pub fn new(pk: impl Into<String>, sk: impl Into<String>) -> Self {
        Item {
            key: ItemKey::new(pk, sk),
            attrs: Attrs::new(),
        }
    }

    /// Builder-style attribute setter — returns `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: AttrValue) -> Self {
        self.attrs.insert(name.into(), value);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }
}

/// Predicate over an item's attributes, evaluated atomically by
/// [`Store::update_item`](super::Store::update_item).
///
/// A missing item evaluates as an empty attribute map. Comparisons against a
/// missing attribute are false; `Lt` compares numbers only and is false on a
/// type mismatch. `NotExists` is the upsert arm — it lets an acquire predicate
/// pass on a partition that has never held the lock.
#[derive(Debug, Clone)]
pub enum Condition {
    NotExists(String),
    Eq(String, AttrValue),
    Ne(String, AttrValue),
    Lt(String, AttrValue),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    pub fn not_exists(name: impl Into<String>) -> Self {
        Condition::NotExists(name.into())
    }

    pub fn eq(name: impl Into<String>, value: AttrValue) -> Self {
        Condition::Eq(name.into(), value)
    }

    pub fn ne(name: impl Into<String>, value: AttrValue) -> Self {
        Condition::Ne(name.into(), value)
    }

    pub fn lt(name: impl Into<String>, value: AttrValue) -> Self {
        Condition::Lt(name.into(), value)
    }

    pub fn and(self, other: Condition) -> Self {
        Condition::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Condition) -> Self {
        Condition::Or(Box::new(self), Box::new(other))
    }

    /// Evaluate this predicate against an item's attributes.
    pub fn eval(&self, attrs: &Attrs) -> bool {
        match self {
            Condition::NotExists(name) => !attrs.contains_key(name),
            Condition::Eq(name, value) => attrs.get(name) == Some(value),
            Condition::Ne(name, value) => attrs.get(name).map_or(false, |v| v != value),
            Condition::Lt(name, value) => match (attrs.get(name), value) {
                (Some(AttrValue::N(a)), AttrValue::N(b)) => a < b,
                _ => false,
            },
            Condition::And(a, b) => a.eval(attrs) && b.eval(attrs),
            Condition::Or(a, b) => a.eval(attrs) || b.eval(attrs),
        }
    }
}

/// A single mutation applied by a conditional update.
#[derive(Debug, Clone)]
pub enum Update {
    /// Set an attribute, creating it if absent.
    Set(String, AttrValue),
    /// Add a delta to a numeric attribute; a missing attribute counts as 0.
    Add(String, i64),
}

impl Update {
    pub fn set(name: impl Into<String>, value: AttrValue) -> Self {
        Update::Set(name.into(), value)
    }

    pub fn add(name: impl Into<String>, delta: i64) -> Self {
        Update::Add(name.into(), delta)
    }

    /// Apply this mutation to an attribute map.
    pub fn apply(&self, attrs: &mut Attrs) {
        match self {
            Update::Set(name, value) => {
                attrs.insert(name.clone(), value.clone());
            }
            Update::Add(name, delta) => {
                let current = attrs.get(name).and_then(AttrValue::as_i64).unwrap_or(0);
                attrs.insert(name.clone(), AttrValue::N(current + delta));
            }
        }
    }
}
