use std::cell::RefCell;
use std::fmt::{self, Write};

use crate::error::ListError;
use crate::slice::Slice;
use crate::value::Value;

/// A growable sequence of heterogeneous [`Value`]s with Python `list` semantics.
///
/// Point accesses normalize negative indices against the current length and
/// fail when the result is out of range; slice accesses clamp instead.
#[derive(Clone, Default, PartialEq)]
pub struct List {
    items: Vec<Value>,
}

impl List {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Drains a fallible source exactly once. The first error is returned as is.
    pub fn try_from_source<I, T, E>(source: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<T, E>>,
        T: Into<Value>,
    {
        source
            .into_iter()
            .map(|item| item.map(Into::into))
            .collect::<Result<Vec<_>, E>>()
            .map(|items| Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [Value] {
        &mut self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn first(&self) -> Option<&Value> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&Value> {
        self.items.last()
    }

    pub(crate) fn into_vec(self) -> Vec<Value> {
        self.items
    }

    fn resolve_index(&self, index: isize) -> Option<usize> {
        let len = self.items.len() as isize;
        let index = if index < 0 { index + len } else { index };
        (0..len).contains(&index).then_some(index as usize)
    }

    fn clamp_bound(&self, bound: isize) -> usize {
        let len = self.items.len() as isize;
        let bound = if bound < 0 {
            (bound + len).max(0)
        } else {
            bound.min(len)
        };
        bound as usize
    }

    pub fn get(&self, index: isize) -> Result<&Value, ListError> {
        let index = self.resolve_index(index).ok_or(ListError::IndexOutOfRange)?;
        Ok(&self.items[index])
    }

    pub fn get_mut(&mut self, index: isize) -> Result<&mut Value, ListError> {
        let index = self.resolve_index(index).ok_or(ListError::IndexOutOfRange)?;
        Ok(&mut self.items[index])
    }

    pub fn set(&mut self, index: isize, value: impl Into<Value>) -> Result<(), ListError> {
        let index = self
            .resolve_index(index)
            .ok_or(ListError::AssignmentIndexOutOfRange)?;
        self.items[index] = value.into();
        Ok(())
    }

    pub fn delete(&mut self, index: isize) -> Result<(), ListError> {
        let index = self
            .resolve_index(index)
            .ok_or(ListError::AssignmentIndexOutOfRange)?;
        self.items.remove(index);
        Ok(())
    }

    pub fn get_slice(&self, slice: &Slice) -> Result<Self, ListError> {
        let indices = slice.indices(self.items.len())?;
        let items = indices
            .positions()
            .map(|position| self.items[position].clone())
            .collect();
        Ok(Self { items })
    }

    /// Assigns `replacement` to the positions selected by `slice`.
    ///
    /// A step of 1 splices, so the list may grow or shrink. Any other step
    /// overwrites in place and needs exactly one replacement per position.
    pub fn set_slice<I>(&mut self, slice: &Slice, replacement: I) -> Result<(), ListError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let indices = slice.indices(self.items.len())?;
        let replacement: Vec<Value> = replacement.into_iter().map(Into::into).collect();
        let inserted = replacement.len();

        if indices.is_contiguous() {
            let span = indices.span();
            let removed = span.len();
            self.items.splice(span, replacement);
            tracing::trace!(
                start = indices.start(),
                stop = indices.stop(),
                removed,
                inserted,
                "splice slice assignment"
            );
            return Ok(());
        }

        if inserted != indices.len() {
            return Err(ListError::ExtendedSliceSize {
                expected: indices.len(),
                got: inserted,
            });
        }
        for (position, value) in indices.positions().zip(replacement) {
            self.items[position] = value;
        }
        tracing::trace!(
            start = indices.start(),
            stop = indices.stop(),
            step = indices.step(),
            inserted,
            "extended slice assignment"
        );
        Ok(())
    }

    pub fn delete_slice(&mut self, slice: &Slice) -> Result<(), ListError> {
        let indices = slice.indices(self.items.len())?;
        if indices.is_empty() {
            return Ok(());
        }

        if indices.is_contiguous() {
            self.items.drain(indices.span());
        } else {
            let mut doomed = vec![false; self.items.len()];
            for position in indices.positions() {
                doomed[position] = true;
            }
            let mut position = 0;
            self.items.retain(|_| {
                let keep = !doomed[position];
                position += 1;
                keep
            });
        }
        tracing::trace!(
            start = indices.start(),
            stop = indices.stop(),
            step = indices.step(),
            removed = indices.len(),
            "slice deletion"
        );
        Ok(())
    }

    pub fn append(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    /// Appends items until the source is exhausted or fails. Items produced
    /// before a failure stay appended.
    pub fn try_extend<I, T, E>(&mut self, source: I) -> Result<(), E>
    where
        I: IntoIterator<Item = Result<T, E>>,
        T: Into<Value>,
    {
        for item in source {
            self.items.push(item?.into());
        }
        Ok(())
    }

    pub fn extend_from_list(&mut self, other: &Self) {
        self.items.extend_from_slice(&other.items);
    }

    pub fn insert(&mut self, index: isize, value: impl Into<Value>) {
        let index = self.clamp_bound(index);
        self.items.insert(index, value.into());
    }

    pub fn remove(&mut self, value: &Value) -> Result<(), ListError> {
        let position = self
            .items
            .iter()
            .position(|item| item == value)
            .ok_or(ListError::RemoveMissing)?;
        self.items.remove(position);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Value, ListError> {
        self.items.pop().ok_or(ListError::PopFromEmpty)
    }

    pub fn pop_at(&mut self, index: isize) -> Result<Value, ListError> {
        if self.items.is_empty() {
            return Err(ListError::PopFromEmpty);
        }
        let index = self
            .resolve_index(index)
            .ok_or(ListError::PopIndexOutOfRange)?;
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn index(&self, value: &Value) -> Result<usize, ListError> {
        self.index_range(value, None, None)
    }

    /// Position of the first item equal to `value` in `[start, stop)`.
    ///
    /// The bounds are normalized like point indices but clamp instead of failing.
    pub fn index_range(
        &self,
        value: &Value,
        start: Option<isize>,
        stop: Option<isize>,
    ) -> Result<usize, ListError> {
        let start = start.map_or(0, |bound| self.clamp_bound(bound));
        let stop = stop.map_or(self.items.len(), |bound| self.clamp_bound(bound));
        (start..stop)
            .find(|&position| self.items[position] == *value)
            .ok_or_else(|| ListError::NotInList {
                value: value.repr(),
            })
    }

    pub fn count(&self, value: &Value) -> usize {
        self.items.iter().filter(|&item| item == value).count()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.iter().any(|item| item == value)
    }

    pub fn concat(&self, other: &Self) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + other.items.len());
        items.extend_from_slice(&self.items);
        items.extend_from_slice(&other.items);
        Self { items }
    }

    /// Concatenates `times` shallow copies of the list.
    ///
    /// Fails instead of aborting when the result cannot be allocated.
    pub fn repeat(&self, times: isize) -> Result<Self, ListError> {
        if times <= 0 || self.items.is_empty() {
            return Ok(Self::new());
        }
        let too_large = ListError::RepeatTooLarge {
            len: self.items.len(),
            times,
        };
        let total = self
            .items
            .len()
            .checked_mul(times.unsigned_abs())
            .filter(|&total| total <= isize::MAX as usize / size_of::<Value>())
            .ok_or_else(|| too_large.clone())?;

        let mut items = Vec::new();
        if items.try_reserve_exact(total).is_err() {
            tracing::debug!(total, "list repetition could not reserve its result");
            return Err(too_large);
        }
        for _ in 0..times {
            items.extend_from_slice(&self.items);
        }
        Ok(Self { items })
    }

    pub fn sum(&self) -> Result<Value, ListError> {
        let mut total = Value::Int(0);
        for item in &self.items {
            total = match (&total, item) {
                (Value::Int(acc), Value::Int(value)) => {
                    Value::Int(acc.checked_add(*value).ok_or(ListError::Overflow)?)
                }
                (Value::Int(acc), Value::Bool(value)) => Value::Int(
                    acc.checked_add(i64::from(*value))
                        .ok_or(ListError::Overflow)?,
                ),
                (Value::Int(acc), Value::Float(value)) => Value::Float(*acc as f64 + value),
                (Value::Float(acc), Value::Int(value)) => Value::Float(acc + *value as f64),
                (Value::Float(acc), Value::Bool(value)) => {
                    Value::Float(acc + f64::from(u8::from(*value)))
                }
                (Value::Float(acc), Value::Float(value)) => Value::Float(acc + value),
                _ => {
                    return Err(ListError::UnsupportedOperand {
                        left: total.type_name().to_string(),
                        right: item.type_name().to_string(),
                    });
                }
            };
        }
        Ok(total)
    }

    pub(crate) fn write_items<W: Write>(
        &self,
        out: &mut W,
        seen: &mut Vec<*const RefCell<List>>,
    ) -> fmt::Result {
        out.write_char('[')?;
        for (position, item) in self.items.iter().enumerate() {
            if position > 0 {
                out.write_str(", ")?;
            }
            item.write_repr(out, seen)?;
        }
        out.write_char(']')
    }
}
