use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while parsing or evaluating an expression.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("malformed number: '{0}'")]
    MalformedNumber(String),

    #[error("unknown unit: '{0}'")]
    UnknownUnit(String),

    #[error("not a function or variable: '{0}'")]
    UnknownFunction(String),

    #[error("variable has no name")]
    MissingVariableName,

    #[error("'{0}' needs an operand and the stack is empty")]
    MissingOperand(&'static str),

    #[error("no conversion from '{from}' to '{to}'")]
    ConversionNotSupported { from: String, to: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("assignment into a non-variable")]
    AssignmentTargetInvalid,

    #[error("cannot update constant '{0}'")]
    ConstantImmutable(String),

    #[error("unmatched '(' before end of input")]
    UnbalancedGroup,

    #[error("'{0}' is recognized but not implemented")]
    NotImplemented(&'static str),
}

/// What a trail entry describes. `Error` entries carry failure text; the
/// rest replay the tokens the parser consumed, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Number,
    Unit,
    Function,
    Variable,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn severity(&self) -> Severity {
        match self.kind {
            MessageKind::Error => Severity::Error,
            _ => Severity::Info,
        }
    }
}

/// Ordered trail of parse tokens and failures for one session.
#[derive(Debug, Default)]
pub struct Messages(Vec<Message>);

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.0.push(Message {
            kind,
            text: text.into(),
        });
    }

    /// Append to the previous entry when it is of `kind`, otherwise start a
    /// new entry. Used to glue a unit suffix onto its number token.
    pub fn append_to_last(&mut self, kind: MessageKind, text: &str) {
        match self.0.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(text),
            _ => self.push(kind, text),
        }
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(MessageKind::Error, text);
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|m| m.kind == MessageKind::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_text_glues_onto_its_number() {
        let mut msgs = Messages::new();
        msgs.push(MessageKind::Number, "25");
        msgs.append_to_last(MessageKind::Number, "C");
        let all: Vec<_> = msgs.iter().collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text, "25C");
    }

    #[test]
    fn errors_are_flagged() {
        let mut msgs = Messages::new();
        msgs.push(MessageKind::Function, "+");
        assert!(!msgs.has_errors());
        msgs.error("division by zero");
        assert!(msgs.has_errors());
        assert_eq!(msgs.iter().last().unwrap().severity(), Severity::Error);
    }
}
