use thiserror::Error as ThisError;

///
/// ModelError
/// Structured error for instance-layer reads/writes and command execution.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ModelError {
    #[error("bad value: expected {expected}, found {found}")]
    BadValue { expected: String, found: String },

    #[error("no such attribute '{name}'")]
    NoSuchAttribute { name: String },

    #[error("cannot execute command '{command}'")]
    CannotExecute { command: String },

    #[error("undo on an empty command stack")]
    EmptyStack,

    #[error("redo index out of bounds")]
    RedoOutOfBounds,

    #[error("cannot instantiate abstract class '{class}'")]
    AbstractInstantiation { class: String },

    #[error("Move requires exactly one of from_index/value, not both or neither")]
    MoveConstruction,

    #[error("pop from an empty collection")]
    EmptyPop,
}
