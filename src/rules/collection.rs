//! Ordered rule chain with lazily-constructed slots.
//!
//! # Design Decisions
//! - Each slot is either a ready rule or a pending factory
//! - A factory runs on first access and its slot is rewritten to the rule,
//!   so later passes reuse the same instance
//! - Slots sit behind their own `Mutex`; concurrent first access still runs
//!   the factory once
//! - A factory producing a non-rule poisons its slot: every access reports
//!   `RuleNotFound` with the produced type and the slot position

use std::any::{type_name, Any};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{RoutingError, RoutingResult};
use crate::rules::{Accepts, Allows, Host, Path, Rule, Secure};

type Product = Box<dyn Any + Send + Sync>;
type Factory = Box<dyn FnOnce() -> Product + Send>;

enum Slot {
    Ready(Arc<dyn Rule>),
    Pending { factory: Factory, produces: &'static str },
    Invalid { produced: &'static str },
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Ready(rule) => f.debug_tuple("Ready").field(&rule.name()).finish(),
            Slot::Pending { produces, .. } => f.debug_tuple("Pending").field(produces).finish(),
            Slot::Invalid { produced } => f.debug_tuple("Invalid").field(produced).finish(),
        }
    }
}

/// Ordered sequence of rules evaluated against each candidate route.
#[derive(Debug, Default)]
pub struct RuleCollection {
    slots: Vec<Mutex<Slot>>,
}

impl RuleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in chain: path, host, method, content type, transport.
    pub fn standard(base_path: impl Into<String>) -> Self {
        let mut rules = Self::new();
        rules.append(Path::new(base_path));
        rules.append(Host);
        rules.append(Allows);
        rules.append(Accepts);
        rules.append(Secure);
        rules
    }

    pub fn append<R: Rule + 'static>(&mut self, rule: R) {
        self.append_shared(Arc::new(rule));
    }

    pub fn append_shared(&mut self, rule: Arc<dyn Rule>) {
        self.slots.push(Mutex::new(Slot::Ready(rule)));
    }

    /// Insert a rule ahead of every existing one.
    pub fn prepend<R: Rule + 'static>(&mut self, rule: R) {
        self.prepend_shared(Arc::new(rule));
    }

    pub fn prepend_shared(&mut self, rule: Arc<dyn Rule>) {
        self.slots.insert(0, Mutex::new(Slot::Ready(rule)));
    }

    /// Append a rule that is constructed on first use.
    pub fn append_factory<F, R>(&mut self, factory: F)
    where
        F: FnOnce() -> R + Send + 'static,
        R: Rule + 'static,
    {
        self.slots.push(Mutex::new(typed_slot(factory)));
    }

    /// Prepend a rule that is constructed on first use.
    pub fn prepend_factory<F, R>(&mut self, factory: F)
    where
        F: FnOnce() -> R + Send + 'static,
        R: Rule + 'static,
    {
        self.slots.insert(0, Mutex::new(typed_slot(factory)));
    }

    /// Append a factory whose product is only checked when first used.
    ///
    /// The product must be one of the built-in rules, an `Arc<dyn Rule>` or
    /// a `Box<dyn Rule>`; anything else fails with `RuleNotFound`. That
    /// includes custom rule types returned by value, which belong in
    /// [`append_factory`](Self::append_factory) instead.
    pub fn append_any_factory<F, T>(&mut self, factory: F)
    where
        F: FnOnce() -> T + Send + 'static,
        T: Any + Send + Sync,
    {
        self.slots.push(Mutex::new(Slot::Pending {
            factory: Box::new(move || Box::new(factory()) as Product),
            produces: type_name::<T>(),
        }));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Rule at `key`, constructing it if the slot is still pending.
    pub fn get(&self, key: usize) -> Option<RoutingResult<Arc<dyn Rule>>> {
        self.slots.get(key).map(|slot| resolve(slot, key))
    }

    /// Iterate rules in order as `(key, rule)`.
    pub fn iter(&self) -> impl Iterator<Item = RoutingResult<(usize, Arc<dyn Rule>)>> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(key, slot)| resolve(slot, key).map(|rule| (key, rule)))
    }
}

fn typed_slot<F, R>(factory: F) -> Slot
where
    F: FnOnce() -> R + Send + 'static,
    R: Rule + 'static,
{
    Slot::Pending {
        factory: Box::new(move || Box::new(Arc::new(factory()) as Arc<dyn Rule>) as Product),
        produces: type_name::<R>(),
    }
}

fn resolve(slot: &Mutex<Slot>, key: usize) -> RoutingResult<Arc<dyn Rule>> {
    let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);

    let resolved = match std::mem::replace(&mut *slot, Slot::Invalid { produced: "<resolving>" }) {
        Slot::Ready(rule) => Ok(rule),
        Slot::Invalid { produced } => Err(produced),
        Slot::Pending { factory, produces } => match into_rule(factory()) {
            Some(rule) => {
                tracing::debug!(key, rule = rule.name(), "Constructed lazy rule");
                Ok(rule)
            }
            None => {
                tracing::error!(key, produced = produces, "Rule factory produced a non-rule value");
                Err(produces)
            }
        },
    };

    match resolved {
        Ok(rule) => {
            *slot = Slot::Ready(rule.clone());
            Ok(rule)
        }
        Err(produced) => {
            *slot = Slot::Invalid { produced };
            Err(RoutingError::RuleNotFound {
                produced: produced.to_string(),
                key,
            })
        }
    }
}

/// Recover a rule from a type-erased factory product.
fn into_rule(product: Product) -> Option<Arc<dyn Rule>> {
    let product = match product.downcast::<Arc<dyn Rule>>() {
        Ok(rule) => return Some(*rule),
        Err(other) => other,
    };
    let product = match product.downcast::<Box<dyn Rule>>() {
        Ok(rule) => return Some(Arc::from(*rule)),
        Err(other) => other,
    };

    macro_rules! builtin {
        ($product:ident, $($ty:ty),+) => {{
            let mut product = $product;
            $(
                product = match product.downcast::<$ty>() {
                    Ok(rule) => return Some(Arc::new(*rule)),
                    Err(other) => other,
                };
            )+
            drop(product);
            None
        }};
    }

    builtin!(product, Path, Host, Allows, Accepts, Secure)
}
