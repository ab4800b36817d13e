//! Stack evaluation and the user-facing session.
//!
//! Nodes run in order against one shared stack: a node pushes its prior
//! operands, runs its children, pushes its trailing operands, then applies
//! its operator. Unit conversion re-enters this same pipeline with the
//! source value seeded as the first operand of the rule's formula.

use crate::cursor::Cursor;
use crate::error::{Error, MessageKind, Messages, Result};
use crate::number::{self, Number};
use crate::settings::Settings;
use crate::tree::{Node, ParseCtx, State};
use crate::vars::{Prompt, VariableStore};

/// Everything an operator implementation can touch.
pub struct EvalCtx<'a> {
    pub stack: &'a mut Vec<Number>,
    pub vars: &'a mut VariableStore,
    pub settings: &'a Settings,
    pub prompt: &'a mut dyn Prompt,
    pub messages: &'a mut Messages,
}

pub(crate) fn run_node(node: &Node, ctx: &mut EvalCtx<'_>) -> Result<()> {
    for n in &node.prior {
        ctx.stack.push(n.clone());
    }
    for child in &node.children {
        run_node(child, ctx)?;
    }
    for n in &node.params {
        ctx.stack.push(n.clone());
    }
    match node.op {
        Some(op) => op.run(ctx),
        None => Ok(()),
    }
}

/// Resolve the stack entry `depth` below the top if it is a variable:
/// refresh it from the store, or ask the prompt for a value when the name
/// is unset. An unanswered prompt leaves the name unset and the operand
/// becomes integer zero for this evaluation only.
pub(crate) fn confirm_entry(ctx: &mut EvalCtx<'_>, depth: usize) -> Result<()> {
    let Some(idx) = ctx.stack.len().checked_sub(1 + depth) else {
        return Ok(());
    };
    let EvalCtx {
        stack,
        vars,
        prompt,
        messages,
        ..
    } = ctx;
    let entry = &mut stack[idx];
    if entry.is_constant() || !entry.is_variable() {
        return Ok(());
    }
    let Some(name) = entry.name().map(str::to_string) else {
        return Ok(());
    };
    if let Some(stored) = vars.lookup(&name) {
        let stored = stored.clone();
        entry.update_from(&stored);
        return Ok(());
    }
    if !entry.is_unset() {
        return Ok(());
    }
    match prompt.read_value(&name) {
        Some(text) if !text.trim().is_empty() => {
            let mut cur = Cursor::new(text.trim());
            match number::parse(&mut cur, messages) {
                Ok(value) => {
                    entry.assign_from(&value);
                    vars.upsert(entry.clone())?;
                    Ok(())
                }
                Err(err) => {
                    messages.error(format!("{name}: {err}"));
                    entry.update_from(&Number::int(0));
                    Ok(())
                }
            }
        }
        _ => {
            messages.push(MessageKind::Variable, format!("{name} = 0 (integer)"));
            entry.update_from(&Number::int(0));
            Ok(())
        }
    }
}

/// Evaluate a conversion formula with `seed` as its left-hand value, on a
/// fresh stack but sharing the caller's store and settings.
pub(crate) fn run_formula(ctx: &mut EvalCtx<'_>, seed: Number, formula: &str) -> Result<Number> {
    tracing::trace!(formula, "formula re-entry");
    let mut cur = Cursor::new(formula);
    let mut nodes: Vec<Node> = Vec::new();
    {
        let mut pctx = ParseCtx {
            vars: &mut *ctx.vars,
            messages: &mut *ctx.messages,
        };
        let mut first = Node::new();
        first.push_prior(seed);
        first.parse(&mut cur, &mut pctx)?;
        let mut carry = first.state;
        nodes.push(first);
        loop {
            cur.skip_whitespace();
            if cur.is_empty() {
                break;
            }
            let mut node = Node::with_state(carry);
            node.parse(&mut cur, &mut pctx)?;
            carry = node.state;
            nodes.push(node);
        }
    }
    let mut stack: Vec<Number> = Vec::new();
    let mut inner = EvalCtx {
        stack: &mut stack,
        vars: &mut *ctx.vars,
        settings: ctx.settings,
        prompt: &mut *ctx.prompt,
        messages: &mut *ctx.messages,
    };
    for node in &nodes {
        run_node(node, &mut inner)?;
    }
    stack.pop().ok_or(Error::MissingOperand("::"))
}

/// One parsing and evaluation session over a caller-owned variable store.
///
/// The stack persists across calls, so a sequence of inputs behaves like
/// segments of one longer expression.
pub struct Session<'a> {
    vars: &'a mut VariableStore,
    prompt: &'a mut dyn Prompt,
    settings: Settings,
    messages: Messages,
    nodes: Vec<Node>,
    stack: Vec<Number>,
}

impl<'a> Session<'a> {
    pub fn new(
        vars: &'a mut VariableStore,
        prompt: &'a mut dyn Prompt,
        settings: Settings,
    ) -> Self {
        Session {
            vars,
            prompt,
            settings,
            messages: Messages::new(),
            nodes: Vec::new(),
            stack: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build the node list for `input`. Returns false only when the text
    /// cannot be scanned at all; recoverable problems land in the message
    /// trail and parsing continues.
    pub fn parse(&mut self, input: &str) -> bool {
        tracing::debug!(input, "parse");
        self.nodes.clear();
        let mut cur = Cursor::new(input);
        let mut carry = State::Init;
        let mut pctx = ParseCtx {
            vars: &mut *self.vars,
            messages: &mut self.messages,
        };
        loop {
            cur.skip_whitespace();
            if cur.is_empty() {
                break;
            }
            let mut node = Node::with_state(carry);
            match node.parse(&mut cur, &mut pctx) {
                Ok(_) => {
                    carry = node.state;
                    self.nodes.push(node);
                }
                Err(err) => {
                    pctx.messages.error(err.to_string());
                    return false;
                }
            }
        }
        true
    }

    /// Run the parsed nodes over the session stack. An operator failure
    /// is recorded and stops the remaining nodes; anything the failing
    /// operator restored stays on the stack. Returns the top of the
    /// stack.
    pub fn run(&mut self) -> Option<Number> {
        let nodes = std::mem::take(&mut self.nodes);
        let mut ctx = EvalCtx {
            stack: &mut self.stack,
            vars: &mut *self.vars,
            settings: &self.settings,
            prompt: &mut *self.prompt,
            messages: &mut self.messages,
        };
        for node in &nodes {
            if let Err(err) = run_node(node, &mut ctx) {
                tracing::warn!(%err, "evaluation stopped");
                ctx.messages.error(err.to_string());
                break;
            }
        }
        self.stack.last().cloned()
    }

    pub fn execute(&mut self, input: &str) -> Option<Number> {
        if self.parse(input) {
            self.run()
        } else {
            None
        }
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn stack(&self) -> &[Number] {
        &self.stack
    }

    pub fn variables(&self) -> &VariableStore {
        self.vars
    }

    /// Render a value with the session's precision.
    pub fn render(&self, n: &Number) -> String {
        n.display_with(self.settings.precision)
    }

    /// Numbered stack listing, top of the stack first.
    pub fn list_stack(&self) -> Vec<String> {
        self.stack
            .iter()
            .rev()
            .enumerate()
            .map(|(i, n)| format!("[{}] {}", i + 1, self.render(n)))
            .collect()
    }

    /// Drop the message trail, keeping the stack and pending nodes.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Forget pending nodes, stacked values, and the message trail. The
    /// variable store is the caller's and is left alone.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.stack.clear();
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::Value;
    use crate::vars::NoPrompt;

    fn eval(input: &str) -> Option<Number> {
        let mut vars = VariableStore::new();
        let mut prompt = NoPrompt;
        let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
        session.execute(input)
    }

    #[test]
    fn greedy_left_to_right_binding() {
        // No precedence climbing: 2+3*4 is (2+3)*4.
        assert_eq!(eval("2+3*4").unwrap().value(), Value::Int(20));
    }

    #[test]
    fn division_by_zero_restores_operands() {
        let mut vars = VariableStore::new();
        let mut prompt = NoPrompt;
        let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
        session.execute("1/0");
        assert!(session.messages().has_errors());
        let stack = session.stack();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack[0].value(), Value::Int(1));
        assert_eq!(stack[1].value(), Value::Int(0));
    }

    #[test]
    fn stack_persists_across_calls() {
        let mut vars = VariableStore::new();
        let mut prompt = NoPrompt;
        let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
        session.execute("7");
        let out = session.execute("3+").unwrap();
        assert_eq!(out.value(), Value::Int(10));
    }

    #[test]
    fn list_stack_counts_from_the_top() {
        let mut vars = VariableStore::new();
        let mut prompt = NoPrompt;
        let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
        session.execute("1 ; 2 3");
        let lines = session.list_stack();
        assert_eq!(lines[0], "[1] 6");
    }

    struct OneAnswer(&'static str);

    impl Prompt for OneAnswer {
        fn read_value(&mut self, _name: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[test]
    fn prompt_supplies_missing_variables() {
        let mut vars = VariableStore::new();
        let mut prompt = OneAnswer("4.5");
        let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
        let out = session.execute("q+1").unwrap();
        assert_eq!(out.value(), Value::Float(5.5));
        assert_eq!(vars.lookup("q").unwrap().value(), Value::Float(4.5));
    }

    #[test]
    fn unanswered_prompt_defaults_to_integer_zero() {
        let mut vars = VariableStore::new();
        let mut prompt = NoPrompt;
        let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
        let out = session.execute("q+7").unwrap();
        assert_eq!(out.value(), Value::Int(7));
        // The store did not learn a value.
        assert!(vars.lookup("q").is_none());
    }
}
