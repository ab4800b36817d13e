//! Unit-aware expression engine for the mensura calculator.
//!
//! Input scans left to right into a node tree whose operands and
//! operators evaluate over a value stack; binding is greedy with no
//! precedence climbing. Values carry units from the
//! [`mensura_units`] catalogue, and `::` converts between them by
//! re-evaluating a rule formula through this same engine.
//!
//! ```
//! use mensura_calc::{NoPrompt, Session, Settings, VariableStore};
//!
//! let mut vars = VariableStore::new();
//! let mut prompt = NoPrompt;
//! let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
//! let result = session.execute("25C::F").unwrap();
//! assert_eq!(session.render(&result), "77F");
//! ```

#![forbid(unsafe_code)]

pub mod cursor;
pub mod error;
pub mod eval;
pub mod number;
mod ops;
pub mod registry;
pub mod settings;
pub mod tree;
pub mod vars;

pub use cursor::Cursor;
pub use error::{Error, Message, MessageKind, Messages, Result, Severity};
pub use eval::{EvalCtx, Session};
pub use number::{Number, Value};
pub use registry::{find_longest, Arity, OpDef};
pub use settings::{Angle, Settings};
pub use tree::Node;
pub use vars::{NoPrompt, Prompt, VariableStore};
