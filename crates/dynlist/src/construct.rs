use crate::error::ListError;
use crate::list::List;
use crate::value::Value;

impl List {
    /// Builds a list the way a dynamic call `list(*args, **kwargs)` would.
    ///
    /// Accepts at most one positional source and no keywords.
    pub fn construct(args: &[Value], kwargs: &[(&str, Value)]) -> Result<Self, ListError> {
        if let Some((name, _)) = kwargs.first() {
            tracing::debug!(keyword = *name, "list constructor rejected keyword argument");
            return Err(ListError::UnexpectedKeyword {
                name: (*name).to_string(),
            });
        }

        match args {
            [] => Ok(Self::new()),
            [source] => Self::from_value(source),
            _ => {
                tracing::debug!(count = args.len(), "list constructor got too many arguments");
                Err(ListError::TooManyArguments(args.len()))
            }
        }
    }

    /// Drains an iterable dynamic value into a new list.
    pub fn from_value(source: &Value) -> Result<Self, ListError> {
        match source {
            Value::List(shared) => match shared.try_borrow() {
                Ok(list) => Ok(list.clone()),
                Err(_) => {
                    tracing::debug!("list constructor source is mutably borrowed");
                    Err(ListError::SourceBorrowed)
                }
            },
            Value::Str(text) => Ok(text.chars().collect()),
            Value::Object(object) => match object.iterate() {
                Some(producer) => Self::try_from_source(producer),
                None => Err(not_iterable(source)),
            },
            _ => Err(not_iterable(source)),
        }
    }
}

fn not_iterable(source: &Value) -> ListError {
    let type_name = source.type_name().to_string();
    tracing::debug!(type_name = %type_name, "list constructor got a non-iterable source");
    ListError::NotIterable { type_name }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::cell::Cell;

    use crate::error::{ErrorKind, ListError};
    use crate::list;
    use crate::list::List;
    use crate::value::{Object, Value, ValueSource};

    #[derive(Debug)]
    struct Countdown {
        from: i64,
        drained: Cell<u32>,
    }

    impl Object for Countdown {
        fn type_name(&self) -> &str {
            "countdown"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn iterate(&self) -> Option<ValueSource<'_>> {
            self.drained.set(self.drained.get() + 1);
            Some(Box::new((0..self.from).rev().map(|value| Ok(Value::Int(value)))))
        }
    }

    #[derive(Debug)]
    struct Faulty;

    impl Object for Faulty {
        fn type_name(&self) -> &str {
            "faulty"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn iterate(&self) -> Option<ValueSource<'_>> {
            Some(Box::new(
                [Ok(Value::Int(1)), Err(ListError::Overflow)].into_iter(),
            ))
        }
    }

    #[test]
    fn zero_or_one_source() {
        assert_eq!(List::construct(&[], &[]), Ok(List::new()));
        let source = Value::from(list![1, 2, 3]);
        assert_eq!(List::construct(&[source], &[]), Ok(list![1, 2, 3]));
        assert_eq!(
            List::construct(&[Value::from("ab")], &[]),
            Ok(list!["a", "b"])
        );
    }

    #[test]
    fn constructed_list_is_a_new_container() {
        let source = Value::from(list![1]);
        let mut list = List::construct(std::slice::from_ref(&source), &[]).unwrap();
        list.append(2);
        assert_eq!(source, Value::from(list![1]));
    }

    #[test]
    fn mutably_borrowed_source_is_an_error() {
        let source = Value::from(list![1, 2]);
        let shared = source.as_list().unwrap();
        let guard = shared.borrow_mut();
        let err = List::from_value(&source).unwrap_err();
        assert_eq!(err, ListError::SourceBorrowed);
        assert_eq!(err.kind(), ErrorKind::Runtime);
        drop(guard);
        assert_eq!(List::from_value(&source), Ok(list![1, 2]));
    }

    #[test]
    fn usage_errors() {
        let err = List::construct(&[Value::from(list![]), Value::from(list![])], &[]).unwrap_err();
        assert_eq!(err, ListError::TooManyArguments(2));
        assert_eq!(err.kind(), ErrorKind::Argument);

        let err = List::construct(&[], &[("key", Value::None)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);

        let err = List::construct(&[Value::Int(5)], &[]).unwrap_err();
        assert_eq!(
            err,
            ListError::NotIterable {
                type_name: "int".to_string()
            }
        );
    }

    #[test]
    fn object_producers_are_drained_once() {
        let countdown = Countdown {
            from: 3,
            drained: Cell::new(0),
        };
        let value = Value::object(countdown);
        assert_eq!(List::from_value(&value), Ok(list![2, 1, 0]));
        let countdown = value
            .as_object()
            .unwrap()
            .as_any()
            .downcast_ref::<Countdown>()
            .unwrap();
        assert_eq!(countdown.drained.get(), 1);
    }

    #[test]
    fn producer_errors_propagate_unchanged() {
        assert_eq!(
            List::construct(&[Value::object(Faulty)], &[]),
            Err(ListError::Overflow)
        );
    }
}
