use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign};

use crate::list::List;
use crate::value::Value;

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_items(f, &mut Vec::new())
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("List(")?;
        self.write_items(f, &mut Vec::new())?;
        f.write_str(")")
    }
}

impl Index<usize> for List {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.as_slice()[index]
    }
}

impl IndexMut<usize> for List {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        &mut self.as_mut_slice()[index]
    }
}

impl PartialEq<[Value]> for List {
    fn eq(&self, other: &[Value]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<Vec<Value>> for List {
    fn eq(&self, other: &Vec<Value>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl PartialEq<Value> for List {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl From<Vec<Value>> for List {
    fn from(items: Vec<Value>) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for List {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Into<Value>> FromIterator<T> for List {
    fn from_iter<I: IntoIterator<Item = T>>(source: I) -> Self {
        let mut list = Self::new();
        list.extend(source);
        list
    }
}

impl<T: Into<Value>> Extend<T> for List {
    fn extend<I: IntoIterator<Item = T>>(&mut self, source: I) {
        for value in source {
            self.append(value);
        }
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Add<&List> for &List {
    type Output = List;

    fn add(self, rhs: &List) -> List {
        self.concat(rhs)
    }
}

impl Add for List {
    type Output = List;

    fn add(mut self, rhs: List) -> List {
        self.extend(rhs);
        self
    }
}

impl AddAssign<&List> for List {
    fn add_assign(&mut self, rhs: &List) {
        self.extend_from_list(rhs);
    }
}

impl AddAssign for List {
    fn add_assign(&mut self, rhs: List) {
        self.extend(rhs);
    }
}

/// Operator form of [`List::repeat`]. Panics, like `Vec` growth does, when the
/// result cannot be allocated.
fn repeat_or_panic(list: &List, times: isize) -> List {
    match list.repeat(times) {
        Ok(repeated) => repeated,
        Err(err) => panic!("{err}"),
    }
}

impl Mul<isize> for &List {
    type Output = List;

    fn mul(self, times: isize) -> List {
        repeat_or_panic(self, times)
    }
}

impl Mul<isize> for List {
    type Output = List;

    fn mul(self, times: isize) -> List {
        repeat_or_panic(&self, times)
    }
}

impl Mul<&List> for isize {
    type Output = List;

    fn mul(self, list: &List) -> List {
        repeat_or_panic(list, self)
    }
}

impl Mul<List> for isize {
    type Output = List;

    fn mul(self, list: List) -> List {
        repeat_or_panic(&list, self)
    }
}

impl MulAssign<isize> for List {
    fn mul_assign(&mut self, times: isize) {
        *self = repeat_or_panic(self, times);
    }
}

#[cfg(test)]
mod tests {
    use crate::list;
    use crate::list::List;
    use crate::value::Value;

    #[test]
    fn concatenation_leaves_operands_alone() {
        let left = list![1, 99, 4];
        let right = list![5, 6];
        assert_eq!(&left + &right, list![1, 99, 4, 5, 6]);
        assert_eq!(left, list![1, 99, 4]);
        assert_eq!(right, list![5, 6]);
        assert_eq!(left.clone() + right.clone(), list![1, 99, 4, 5, 6]);
    }

    #[test]
    fn repetition_commutes() {
        let list = list![1, 99, 4];
        assert_eq!(&list * 2, list![1, 99, 4, 1, 99, 4]);
        assert_eq!(2_isize * &list, &list * 2);
        assert!((&list * 0).is_empty());
        assert!((-3_isize * &list).is_empty());
        assert_eq!(&list * 1, list);
        assert!((List::new() * isize::MAX).is_empty());
    }

    #[test]
    fn repetition_is_shallow() {
        let list = list![list![1]] * 2;
        list[0].as_list().unwrap().borrow_mut().append(2);
        assert_eq!(list[1], Value::from(list![1, 2]));
    }

    #[test]
    fn in_place_operators() {
        let mut list = list![1];
        list += &list![2];
        list += list![3];
        assert_eq!(list, list![1, 2, 3]);
        list *= 2;
        assert_eq!(list, list![1, 2, 3, 1, 2, 3]);
        list *= -1;
        assert!(list.is_empty());
    }

    #[test]
    fn equality_against_other_sequences() {
        let list = list![1, "a", ()];
        let plain = vec![Value::Int(1), Value::from("a"), Value::None];
        assert_eq!(list, plain);
        assert_eq!(list, *plain.as_slice());
        assert_eq!(list, Value::from(list![1, "a", ()]));
        assert_ne!(list, Value::Int(1));
        assert_ne!(list, Value::from("[1, 'a', None]"));
        assert_ne!(list, list![1, "a"]);
        assert_eq!(list![1, 2.0], list![1.0, 2]);
    }

    #[test]
    fn renderings() {
        let list = list![1, "a", (), 2.5, true, list![]];
        assert_eq!(list.to_string(), "[1, 'a', None, 2.5, True, []]");
        assert_eq!(format!("{list:?}"), "List([1, 'a', None, 2.5, True, []])");
        assert_eq!(List::new().to_string(), "[]");
        assert_eq!(format!("{:?}", List::new()), "List([])");
    }

    #[test]
    fn iteration_matches_indexing() {
        let list: List = (0..10).collect();
        for (position, value) in (&list).into_iter().enumerate() {
            assert_eq!(value, &list[position]);
        }
        let owned: Vec<Value> = list.clone().into_iter().collect();
        assert_eq!(list, owned);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_mut_panics_out_of_range() {
        let mut list = list![1];
        list[1] = Value::None;
    }
}
