#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    Index,
    Value,
    Argument,
    Type,
    Overflow,
    Runtime,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ListError {
    #[error("list index out of range")]
    IndexOutOfRange,

    #[error("list assignment index out of range")]
    AssignmentIndexOutOfRange,

    #[error("pop from empty list")]
    PopFromEmpty,

    #[error("pop index out of range")]
    PopIndexOutOfRange,

    #[error("slice step cannot be zero")]
    ZeroStep,

    #[error("attempt to assign sequence of size {got} to extended slice of size {expected}")]
    ExtendedSliceSize { expected: usize, got: usize },

    #[error("{value} is not in list")]
    NotInList { value: String },

    #[error("list.remove(x): x not in list")]
    RemoveMissing,

    #[error("list expected at most 1 argument, got {0}")]
    TooManyArguments(usize),

    #[error("list() takes no keyword arguments (got `{name}`)")]
    UnexpectedKeyword { name: String },

    #[error("'{type_name}' object is not iterable")]
    NotIterable { type_name: String },

    #[error("unsupported operand type(s) for +: '{left}' and '{right}'")]
    UnsupportedOperand { left: String, right: String },

    #[error("integer overflow in sum")]
    Overflow,

    #[error("cannot repeat a list of {len} items {times} times: result too large")]
    RepeatTooLarge { len: usize, times: isize },

    #[error("source list is being modified elsewhere")]
    SourceBorrowed,
}

impl ListError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IndexOutOfRange
            | Self::AssignmentIndexOutOfRange
            | Self::PopFromEmpty
            | Self::PopIndexOutOfRange => ErrorKind::Index,
            Self::ZeroStep
            | Self::ExtendedSliceSize { .. }
            | Self::NotInList { .. }
            | Self::RemoveMissing => ErrorKind::Value,
            Self::TooManyArguments(_) | Self::UnexpectedKeyword { .. } | Self::NotIterable { .. } => {
                ErrorKind::Argument
            }
            Self::UnsupportedOperand { .. } => ErrorKind::Type,
            Self::Overflow | Self::RepeatTooLarge { .. } => ErrorKind::Overflow,
            Self::SourceBorrowed => ErrorKind::Runtime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ListError};

    #[test]
    fn messages_match_reference_wording() {
        assert_eq!(
            ListError::ExtendedSliceSize {
                expected: 2,
                got: 3
            }
            .to_string(),
            "attempt to assign sequence of size 3 to extended slice of size 2"
        );
        assert_eq!(
            ListError::NotInList {
                value: "'x'".to_string()
            }
            .to_string(),
            "'x' is not in list"
        );
        assert_eq!(
            ListError::TooManyArguments(2).to_string(),
            "list expected at most 1 argument, got 2"
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(ListError::PopFromEmpty.kind(), ErrorKind::Index);
        assert_eq!(ListError::RemoveMissing.kind(), ErrorKind::Value);
        assert_eq!(ListError::ZeroStep.kind(), ErrorKind::Value);
        assert_eq!(ListError::TooManyArguments(3).kind(), ErrorKind::Argument);
        assert_eq!(ListError::Overflow.kind(), ErrorKind::Overflow);
        assert_eq!(
            ListError::RepeatTooLarge { len: 2, times: isize::MAX }.kind(),
            ErrorKind::Overflow
        );
        assert_eq!(ListError::SourceBorrowed.kind(), ErrorKind::Runtime);
    }
}
