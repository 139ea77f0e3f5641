use std::fmt::Display;
// outcomes and errors which occur during processing
#[derive(Debug, PartialEq, Clone)]
pub enum ProcessEvent {
    ProcessComplete,
    InputOpen { path: String, reason: String },
    InputRead(String),
    OutputWrite { path: String, reason: String },
    ReportsFailed(usize),
}

impl Display for ProcessEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessEvent::ProcessComplete => write!(f, "",),
            ProcessEvent::InputOpen { path, reason } => {
                write!(f, "Error: {path} cannot be opened: {reason}")
            }
            ProcessEvent::InputRead(err) => write!(f, "Error: failed reading input: {err}"),
            ProcessEvent::OutputWrite { path, reason } => {
                write!(f, "Error: {path} cannot be written: {reason}")
            }
            ProcessEvent::ReportsFailed(count) => {
                write!(f, "{count} of the summary reports could not be written")
            }
        }
    }
}

impl std::error::Error for ProcessEvent {}
