//! Caller-owned output locations written during parsing.
//!
//! Instead of holding raw references into caller memory, bound outputs are
//! shared [`Slot`] handles. The parser clones the handle at bind time and
//! writes through it synchronously: once when binding (scalar slots get the
//! default or the kind's zero value), once per reset at the start of every
//! parse, and once per accepted value.

use std::cell::RefCell;
use std::rc::Rc;

use crate::argument::ArgValue;

/// A shared output location the parser writes into as values are accepted.
pub type Slot<T> = Rc<RefCell<T>>;

/// Convenience constructor for a zero-initialized [`Slot`].
pub fn slot<T: Default>() -> Slot<T> {
    Rc::new(RefCell::new(T::default()))
}

/// A registered output slot, typed per argument kind.
///
/// Scalar variants overwrite on every accepted value (last one wins);
/// sequence variants append.
#[derive(Debug, Clone)]
pub(crate) enum Store {
    Str(Slot<String>),
    Int(Slot<i64>),
    Flag(Slot<bool>),
    StrSeq(Slot<Vec<String>>),
    IntSeq(Slot<Vec<i64>>),
}

impl Store {
    /// Restore the slot to its pre-parse state: scalars take the default
    /// (or the kind's zero value), sequences empty out.
    pub(crate) fn reset(&self, default: Option<&ArgValue>) {
        match self {
            Self::Str(slot) => {
                *slot.borrow_mut() = default
                    .and_then(ArgValue::as_str)
                    .unwrap_or_default()
                    .to_string();
            }
            Self::Int(slot) => {
                *slot.borrow_mut() = default.and_then(ArgValue::as_int).unwrap_or_default();
            }
            Self::Flag(slot) => {
                *slot.borrow_mut() = matches!(default, Some(ArgValue::Flag(true)));
            }
            Self::StrSeq(slot) => slot.borrow_mut().clear(),
            Self::IntSeq(slot) => slot.borrow_mut().clear(),
        }
    }

    /// Mirror one accepted value into the slot.
    ///
    /// Kind mismatches cannot be constructed through the typed builder
    /// handles, so mismatched pairs are ignored.
    pub(crate) fn accept(&self, value: &ArgValue) {
        match (self, value) {
            (Self::Str(slot), ArgValue::String(s)) => *slot.borrow_mut() = s.clone(),
            (Self::Int(slot), ArgValue::Int(i)) => *slot.borrow_mut() = *i,
            (Self::Flag(slot), ArgValue::Flag(b)) => *slot.borrow_mut() = *b,
            (Self::StrSeq(slot), ArgValue::String(s)) => slot.borrow_mut().push(s.clone()),
            (Self::IntSeq(slot), ArgValue::Int(i)) => slot.borrow_mut().push(*i),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_reset_restores_default() {
        let cell: Slot<i64> = slot();
        let store = Store::Int(cell.clone());
        store.accept(&ArgValue::Int(42));
        assert_eq!(*cell.borrow(), 42);
        store.reset(Some(&ArgValue::Int(7)));
        assert_eq!(*cell.borrow(), 7);
        store.reset(None);
        assert_eq!(*cell.borrow(), 0);
    }

    #[test]
    fn sequence_appends_and_clears() {
        let cell: Slot<Vec<String>> = slot();
        let store = Store::StrSeq(cell.clone());
        store.accept(&ArgValue::String("a".into()));
        store.accept(&ArgValue::String("b".into()));
        assert_eq!(*cell.borrow(), vec!["a".to_string(), "b".to_string()]);
        store.reset(None);
        assert!(cell.borrow().is_empty());
    }
}
