use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt::{self, Write};
use std::rc::Rc;

use crate::error::ListError;
use crate::list::List;

pub type SharedList = Rc<RefCell<List>>;

/// Nesting limit for comparing lists; anything deeper compares unequal.
const MAX_COMPARE_DEPTH: usize = 256;

thread_local! {
    static COMPARE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Boxed producer handed out by [`Object::iterate`].
pub type ValueSource<'a> = Box<dyn Iterator<Item = Result<Value, ListError>> + 'a>;

/// A user-defined element.
///
/// Implementors decide their own equality and rendering. Returning `None` from
/// [`Object::eq_value`] means the comparison is not defined by this object; the
/// other operand is then asked, and identity decides if neither answers.
pub trait Object: fmt::Debug {
    fn type_name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;

    fn eq_value(&self, _other: &Value) -> Option<bool> {
        None
    }

    fn repr(&self) -> String {
        format!("{self:?}")
    }

    /// Producer used when the object is the argument of [`List::construct`].
    fn iterate(&self) -> Option<ValueSource<'_>> {
        None
    }
}

#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    List(SharedList),
    Object(Rc<dyn Object>),
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn list(list: List) -> Self {
        Self::List(Rc::new(RefCell::new(list)))
    }

    pub fn object<O: Object + 'static>(object: O) -> Self {
        Self::Object(Rc::new(object))
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::None => "NoneType",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Object(object) => object.type_name(),
        }
    }

    /// Identity of reference-carrying values. Scalars have no identity.
    pub fn same_ref(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => Rc::ptr_eq(a, b),
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&SharedList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Rc<dyn Object>> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn repr(&self) -> String {
        format!("{self:?}")
    }

    fn number(&self) -> Option<Number> {
        match self {
            Self::Bool(value) => Some(Number::Int(i64::from(*value))),
            Self::Int(value) => Some(Number::Int(*value)),
            Self::Float(value) => Some(Number::Float(*value)),
            _ => None,
        }
    }

    pub(crate) fn write_repr<W: Write>(
        &self,
        out: &mut W,
        seen: &mut Vec<*const RefCell<List>>,
    ) -> fmt::Result {
        match self {
            Self::None => out.write_str("None"),
            Self::Bool(true) => out.write_str("True"),
            Self::Bool(false) => out.write_str("False"),
            Self::Int(value) => write!(out, "{value}"),
            Self::Float(value) => write_float(out, *value),
            Self::Str(value) => write_str_repr(out, value),
            Self::List(shared) => {
                let ptr = Rc::as_ptr(shared);
                if seen.contains(&ptr) {
                    return out.write_str("[...]");
                }
                let Ok(list) = shared.try_borrow() else {
                    return out.write_str("[...]");
                };
                seen.push(ptr);
                let result = list.write_items(out, seen);
                seen.pop();
                result
            }
            Self::Object(object) => out.write_str(&object.repr()),
        }
    }
}

fn int_eq_float(int: i64, float: f64) -> bool {
    // 2^63 is exact in f64; anything at or past it cannot be an i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    float.fract() == 0.0 && (-LIMIT..LIMIT).contains(&float) && float as i64 == int
}

fn numbers_eq(left: Number, right: Number) -> bool {
    match (left, right) {
        (Number::Int(a), Number::Int(b)) => a == b,
        (Number::Float(a), Number::Float(b)) => a == b,
        (Number::Int(i), Number::Float(f)) | (Number::Float(f), Number::Int(i)) => {
            int_eq_float(i, f)
        }
    }
}

struct DepthGuard(usize);

impl Drop for DepthGuard {
    fn drop(&mut self) {
        COMPARE_DEPTH.set(self.0);
    }
}

fn compare_nested(compare: impl FnOnce() -> bool) -> bool {
    let depth = COMPARE_DEPTH.get();
    if depth >= MAX_COMPARE_DEPTH {
        tracing::trace!(depth, "list comparison hit the nesting limit");
        return false;
    }
    COMPARE_DEPTH.set(depth + 1);
    let _guard = DepthGuard(depth);
    compare()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.same_ref(other) {
            return true;
        }
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => match (a.try_borrow(), b.try_borrow()) {
                (Ok(a), Ok(b)) => compare_nested(|| *a == *b),
                _ => false,
            },
            (Self::Object(a), _) => a
                .eq_value(other)
                .or_else(|| match other {
                    Self::Object(b) => b.eq_value(self),
                    _ => None,
                })
                .unwrap_or(false),
            (_, Self::Object(b)) => b.eq_value(self).unwrap_or(false),
            _ => match (self.number(), other.number()) {
                (Some(a), Some(b)) => numbers_eq(a, b),
                _ => false,
            },
        }
    }
}

impl PartialEq<List> for Value {
    fn eq(&self, other: &List) -> bool {
        match self {
            Self::List(shared) => shared
                .try_borrow()
                .is_ok_and(|list| compare_nested(|| *list == *other)),
            _ => false,
        }
    }
}

fn write_float<W: Write>(out: &mut W, value: f64) -> fmt::Result {
    if value.is_nan() {
        return out.write_str("nan");
    }
    if value.is_infinite() {
        return out.write_str(if value > 0.0 { "inf" } else { "-inf" });
    }

    let abs = value.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let formatted = format!("{value:e}");
        let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let sign = if exponent < 0 { '-' } else { '+' };
        return write!(out, "{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }

    let formatted = format!("{value}");
    out.write_str(&formatted)?;
    if !formatted.contains('.') {
        out.write_str(".0")?;
    }
    Ok(())
}

fn write_str_repr<W: Write>(out: &mut W, value: &str) -> fmt::Result {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };
    out.write_char(quote)?;
    for ch in value.chars() {
        match ch {
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            ch if ch == quote => {
                out.write_char('\\')?;
                out.write_char(ch)?;
            }
            ch if (ch as u32) < 0x20 || ch as u32 == 0x7f => write!(out, "\\x{:02x}", ch as u32)?,
            ch => out.write_char(ch)?,
        }
    }
    out.write_char(quote)
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_repr(f, &mut Vec::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            _ => self.write_repr(f, &mut Vec::new()),
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::None
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Str(Rc::from(value.to_string()))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Rc::from(value))
    }
}

impl From<Rc<str>> for Value {
    fn from(value: Rc<str>) -> Self {
        Self::Str(value)
    }
}

impl From<List> for Value {
    fn from(value: List) -> Self {
        Self::list(value)
    }
}

impl From<SharedList> for Value {
    fn from(value: SharedList) -> Self {
        Self::List(value)
    }
}

impl From<Rc<dyn Object>> for Value {
    fn from(value: Rc<dyn Object>) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}
