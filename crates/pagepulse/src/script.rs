//! Parsing of `simulate` step arguments.

use std::str::FromStr;

/// One page-lifecycle step of a simulation script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Page(String),
    Add(String),
    Main(String),
    Fail(String),
    Disable,
    Enable,
    ModalOpen,
    ModalClose,
    After(String),
    Cycle(String),
    Clear,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Invalid step '{input}': {reason}")]
pub struct StepParseError {
    pub input: String,
    pub reason: &'static str,
}

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| StepParseError {
            input: s.to_string(),
            reason,
        };

        let (verb, arg) = match s.split_once(':') {
            Some((verb, arg)) => (verb, Some(arg.trim())),
            None => (s, None),
        };

        let named = |arg: Option<&str>| match arg {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err(err("expected a name after ':'")),
        };

        match (verb.trim(), arg) {
            ("page", a) => named(a).map(Step::Page),
            ("add", a) => named(a).map(Step::Add),
            ("main", a) => named(a).map(Step::Main),
            ("fail", a) => named(a).map(Step::Fail),
            ("after", a) => named(a).map(Step::After),
            ("cycle", a) => named(a).map(Step::Cycle),
            ("disable", None) => Ok(Step::Disable),
            ("enable", None) => Ok(Step::Enable),
            ("modal-open", None) => Ok(Step::ModalOpen),
            ("modal-close", None) => Ok(Step::ModalClose),
            ("clear", None) => Ok(Step::Clear),
            ("disable" | "enable" | "modal-open" | "modal-close" | "clear", Some(_)) => {
                Err(err("step takes no argument"))
            }
            _ => Err(err("unknown step")),
        }
    }
}

/// Parse every step up front so a typo fails before anything runs.
pub fn parse_steps<'a, I>(inputs: I) -> Result<Vec<Step>, StepParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    inputs.into_iter().map(str::parse::<Step>).collect()
}
