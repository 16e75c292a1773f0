//! The plotting engine seam.

use log::trace;

use crate::error::StyleResult;
use crate::plotting::command::PlotCommand;

/// Something that can carry out drawing calls, typically an adapter over a
/// real plotting library's axes object.
pub trait PlotTarget {
    fn draw(&mut self, command: PlotCommand) -> StyleResult<()>;
}

impl PlotTarget for Vec<PlotCommand> {
    fn draw(&mut self, command: PlotCommand) -> StyleResult<()> {
        self.push(command);
        Ok(())
    }
}

impl<T: PlotTarget + ?Sized> PlotTarget for &mut T {
    fn draw(&mut self, command: PlotCommand) -> StyleResult<()> {
        (**self).draw(command)
    }
}

/// A target that keeps every call it receives.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    commands: Vec<PlotCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }

    pub fn commands(&self) -> &[PlotCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PlotCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// The recorded calls as a pretty-printed JSON array.
    pub fn to_json_pretty(&self) -> StyleResult<String> {
        Ok(serde_json::to_string_pretty(&self.commands)?)
    }
}

impl PlotTarget for Recorder {
    fn draw(&mut self, command: PlotCommand) -> StyleResult<()> {
        trace!("Recorded '{}' call", command.kind());
        self.commands.push(command);
        Ok(())
    }
}
