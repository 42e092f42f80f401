//! Motion commands and the append-only command log

use polarwave_core::ActuatorCoords;
use std::fmt;

/// A single entry of the command stream.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionCommand {
    /// Setup directive emitted once at sink construction
    Directive(String),
    /// Drawing move (`G1`) to an absolute actuator position
    Linear(ActuatorCoords),
    /// Pen-up repositioning (`G0`) to an absolute actuator position
    Rapid(ActuatorCoords),
}

impl MotionCommand {
    pub fn directive(text: impl Into<String>) -> Self {
        MotionCommand::Directive(text.into())
    }

    /// Target of a motion entry; `None` for directives.
    pub fn target(&self) -> Option<ActuatorCoords> {
        match self {
            MotionCommand::Directive(_) => None,
            MotionCommand::Linear(c) | MotionCommand::Rapid(c) => Some(*c),
        }
    }

    pub fn is_motion(&self) -> bool {
        self.target().is_some()
    }
}

/// Format a coordinate to 3 decimals without printing `-0.000`.
fn coord(value: f64) -> String {
    let rounded = format!("{:.3}", value);
    if rounded == "-0.000" {
        "0.000".to_string()
    } else {
        rounded
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionCommand::Directive(text) => f.write_str(text),
            MotionCommand::Linear(c) => write!(f, "G1 X{} Y{}", coord(c.a), coord(c.b)),
            MotionCommand::Rapid(c) => write!(f, "G0 X{} Y{}", coord(c.a), coord(c.b)),
        }
    }
}

/// Ordered, append-only sequence of emitted commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandLog {
    commands: Vec<MotionCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log pre-filled with setup directives.
    pub fn with_preamble<I, S>(directives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: directives
                .into_iter()
                .map(MotionCommand::directive)
                .collect(),
        }
    }

    pub fn push(&mut self, command: MotionCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[MotionCommand] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MotionCommand> {
        self.commands.iter()
    }

    /// Leading directives.
    pub fn preamble(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map_while(|c| match c {
            MotionCommand::Directive(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of motion entries (linear and rapid).
    pub fn motion_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_motion()).count()
    }

    /// Actuator targets of every motion entry, in order.
    pub fn positions(&self) -> Vec<ActuatorCoords> {
        self.commands.iter().filter_map(MotionCommand::target).collect()
    }

    /// Rendered command lines.
    pub fn lines(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a CommandLog {
    type Item = &'a MotionCommand;
    type IntoIter = std::slice::Iter<'a, MotionCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl fmt::Display for CommandLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            writeln!(f, "{}", command)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        assert_eq!(
            MotionCommand::Linear(ActuatorCoords::new(1.23456, -7.0)).to_string(),
            "G1 X1.235 Y-7.000"
        );
        assert_eq!(
            MotionCommand::Rapid(ActuatorCoords::new(0.0, 2.5)).to_string(),
            "G0 X0.000 Y2.500"
        );
        assert_eq!(MotionCommand::directive("G90").to_string(), "G90");
    }

    #[test]
    fn test_negative_zero_suppressed() {
        assert_eq!(
            MotionCommand::Linear(ActuatorCoords::new(-1e-12, -0.0001)).to_string(),
            "G1 X0.000 Y0.000"
        );
    }

    #[test]
    fn test_log_order_and_positions() {
        let mut log = CommandLog::with_preamble(["G28.3", "G90"]);
        log.push(MotionCommand::Linear(ActuatorCoords::new(1.0, 2.0)));
        log.push(MotionCommand::Rapid(ActuatorCoords::new(3.0, 4.0)));

        assert_eq!(log.len(), 4);
        assert_eq!(log.motion_count(), 2);
        assert_eq!(log.preamble().collect::<Vec<_>>(), vec!["G28.3", "G90"]);
        assert_eq!(
            log.positions(),
            vec![ActuatorCoords::new(1.0, 2.0), ActuatorCoords::new(3.0, 4.0)]
        );
        assert_eq!(
            log.to_string(),
            "G28.3\nG90\nG1 X1.000 Y2.000\nG0 X3.000 Y4.000\n"
        );
    }
}
