use super::Command;
use crate::error::ModelError;
use crate::model::Model;

///
/// CommandStack
/// Linear undo/redo stack with an integer cursor pointing at the most
/// recently executed command; `-1` means empty.
///

#[derive(Default)]
pub struct CommandStack {
    commands: Vec<Box<dyn Command>>,
    cursor: isize,
}

impl CommandStack {
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            cursor: -1,
        }
    }

    /// Checks `can_execute`, runs `execute()`, then splices `command` at
    /// `cursor + 1`, truncating any redo suffix first — a new execution
    /// after `undo` discards whatever could have been redone.
    pub fn execute(&mut self, model: &mut Model, mut command: Box<dyn Command>) -> Result<(), ModelError> {
        if !command.can_execute(model) {
            return Err(ModelError::CannotExecute {
                command: command.label().to_string(),
            });
        }
        command.execute(model)?;

        let insert_at = (self.cursor + 1) as usize;
        self.commands.truncate(insert_at);
        self.commands.push(command);
        self.cursor = insert_at as isize;
        Ok(())
    }

    pub fn execute_all(
        &mut self,
        model: &mut Model,
        commands: impl IntoIterator<Item = Box<dyn Command>>,
    ) -> Result<(), ModelError> {
        for command in commands {
            self.execute(model, command)?;
        }
        Ok(())
    }

    pub fn undo(&mut self, model: &mut Model) -> Result<(), ModelError> {
        if self.cursor < 0 {
            return Err(ModelError::EmptyStack);
        }
        let idx = self.cursor as usize;
        if !self.commands[idx].can_undo(model) {
            return Err(ModelError::CannotExecute {
                command: self.commands[idx].label().to_string(),
            });
        }
        self.commands[idx].undo(model)?;
        self.cursor -= 1;
        Ok(())
    }

    pub fn redo(&mut self, model: &mut Model) -> Result<(), ModelError> {
        let next = self.cursor + 1;
        if next < 0 || next as usize >= self.commands.len() {
            return Err(ModelError::RedoOutOfBounds);
        }
        self.commands[next as usize].redo(model)?;
        self.cursor = next;
        Ok(())
    }

    /// The command at the cursor, if any.
    #[must_use]
    pub fn top(&self) -> Option<&dyn Command> {
        if self.cursor < 0 {
            None
        } else {
            self.commands.get(self.cursor as usize).map(AsRef::as_ref)
        }
    }

    #[must_use]
    pub const fn cursor(&self) -> isize {
        self.cursor
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cursor < 0
    }
}
