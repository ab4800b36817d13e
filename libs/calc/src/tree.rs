//! Expression tree builder.
//!
//! Input is consumed left to right into a list of nodes; each node holds
//! operands scanned before its operator (`prior`), nested subexpressions
//! (`children`), and operands scanned after (`params`). Binding is
//! greedy, with no precedence climbing: `2+3*4` is `(2+3)*4`.
//!
//! A builder starts in the state its predecessor finished in. That carry
//! is what lets `(9-1)-4` treat the `-` after the closing paren as a
//! binary operator instead of the sign of a literal.

use crate::cursor::Cursor;
use crate::error::{Error, MessageKind, Messages, Result};
use crate::number::{self, Number};
use crate::registry::{self, Arity, OpDef};
use crate::vars::VariableStore;

/// Mutable context threaded through parsing. Assignments write the store
/// at parse time, so the store is borrowed mutably here too.
pub(crate) struct ParseCtx<'a> {
    pub vars: &'a mut VariableStore,
    pub messages: &'a mut Messages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum State {
    #[default]
    Init,
    /// At least one operand scanned, no operator yet.
    NumberSeen,
    /// A binary or assignment operator waits for its right operand.
    Binary,
    /// A unary operator waits for a following group.
    Unary,
    /// `::` waits for its target-unit literal.
    Convert,
    /// A group opened here and its content parsed into children.
    Group,
    /// A close token ended a group.
    GroupClosed,
    /// Operator bound with no trailing operand.
    Function,
    /// Operator and right operand both bound.
    Parsed,
}

#[derive(Debug, Default)]
pub struct Node {
    pub(crate) state: State,
    pub(crate) op: Option<&'static OpDef>,
    pub(crate) prior: Vec<Number>,
    pub(crate) children: Vec<Node>,
    pub(crate) params: Vec<Number>,
}

impl Node {
    pub fn new() -> Self {
        Node::default()
    }

    pub(crate) fn with_state(state: State) -> Self {
        Node {
            state,
            ..Node::default()
        }
    }

    /// Seed an operand ahead of parsing, used when re-evaluating a
    /// conversion formula against an existing value.
    pub(crate) fn push_prior(&mut self, n: Number) {
        self.prior.push(n);
        self.state = State::NumberSeen;
    }

    /// Consume input until this node is complete (`Ok(true)`) or the
    /// input runs out (`Ok(false)`).
    pub(crate) fn parse(&mut self, cur: &mut Cursor<'_>, ctx: &mut ParseCtx<'_>) -> Result<bool> {
        let mut done = false;
        while !done && !cur.is_empty() {
            cur.skip_whitespace();
            if cur.is_empty() {
                break;
            }
            if self.state == State::Convert
                || (cur.starts_number() && matches!(self.state, State::Init | State::Binary))
            {
                let n = number::parse(cur, ctx.messages)?;
                done = self.take_number(n);
            } else {
                done = self.parse_operator(cur, ctx)?;
            }
        }
        Ok(done)
    }

    /// Place a scanned operand. A number arriving directly after another
    /// operand, with no operator bound, means implicit multiplication
    /// (`2pi` is `2*pi`).
    fn take_number(&mut self, n: Number) -> bool {
        match self.state {
            State::Binary | State::Convert => {
                self.params.push(n);
                self.state = State::Parsed;
                true
            }
            State::NumberSeen
                if self.op.is_none() && !self.prior.is_empty() && self.params.is_empty() =>
            {
                self.op = Some(registry::multiply());
                self.params.push(n);
                self.state = State::Parsed;
                true
            }
            _ => {
                self.prior.push(n);
                self.state = State::NumberSeen;
                false
            }
        }
    }

    fn parse_operator(&mut self, cur: &mut Cursor<'_>, ctx: &mut ParseCtx<'_>) -> Result<bool> {
        match registry::find_longest(cur.remaining()) {
            Some((len, op)) => {
                if self.op.is_none() || self.state == State::Unary {
                    ctx.messages.push(MessageKind::Function, op.spelling);
                    cur.consume(len);
                    cur.skip_whitespace();
                    self.bind_operator(op, cur, ctx)
                } else {
                    // This node is complete; the rest parses beneath it
                    // and runs before this node's operator.
                    let mut done = false;
                    let mut carry = State::Init;
                    while !done && !cur.is_empty() {
                        let mut child = Node::with_state(carry);
                        done = child.parse(cur, ctx)?;
                        carry = child.state;
                        self.children.push(child);
                    }
                    self.state = State::Function;
                    Ok(true)
                }
            }
            None if cur.starts_number() => {
                let n = number::parse(cur, ctx.messages)?;
                // The node keeps scanning even if the operand completed
                // an implicit multiplication.
                self.take_number(n);
                Ok(false)
            }
            None => match number::parse_variable(cur, ctx.vars, ctx.messages)? {
                Some(n) => Ok(self.take_number(n)),
                // Parse-time assignment consumed the text and produced
                // no operand.
                None => Ok(false),
            },
        }
    }

    fn bind_operator(
        &mut self,
        op: &'static OpDef,
        cur: &mut Cursor<'_>,
        ctx: &mut ParseCtx<'_>,
    ) -> Result<bool> {
        match op.arity {
            Arity::Binary | Arity::Assign => {
                self.op = Some(op);
                self.state = State::Binary;
                Ok(false)
            }
            Arity::Convert => {
                self.op = Some(op);
                self.state = State::Convert;
                Ok(false)
            }
            Arity::Unary => {
                self.op = Some(op);
                let call_form = registry::find_longest(cur.remaining())
                    .is_some_and(|(_, next)| next.arity == Arity::GroupOpen);
                if call_form {
                    // `sin(...)`: hold the operator until the group has
                    // produced its value.
                    self.state = State::Unary;
                    Ok(false)
                } else {
                    self.state = State::Function;
                    Ok(true)
                }
            }
            Arity::GroupOpen => {
                self.state = State::Group;
                let mut done = false;
                let mut closed = false;
                let mut carry = State::Init;
                while !done && !cur.is_empty() {
                    let mut child = Node::with_state(carry);
                    done = child.parse(cur, ctx)?;
                    carry = child.state;
                    if child.state == State::GroupClosed {
                        done = true;
                        closed = true;
                    }
                    self.children.push(child);
                }
                if !closed && !done && cur.is_empty() {
                    ctx.messages.error(Error::UnbalancedGroup.to_string());
                }
                Ok(true)
            }
            Arity::GroupClose => {
                self.state = State::GroupClosed;
                Ok(true)
            }
            Arity::Separator => {
                self.op = Some(op);
                self.state = State::Function;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::Value;

    fn build(input: &str) -> (Vec<Node>, Messages, VariableStore) {
        let mut vars = VariableStore::new();
        let mut messages = Messages::new();
        let mut nodes = Vec::new();
        let mut cur = Cursor::new(input);
        let mut carry = State::Init;
        {
            let mut ctx = ParseCtx {
                vars: &mut vars,
                messages: &mut messages,
            };
            loop {
                cur.skip_whitespace();
                if cur.is_empty() {
                    break;
                }
                let mut node = Node::with_state(carry);
                node.parse(&mut cur, &mut ctx).unwrap();
                carry = node.state;
                nodes.push(node);
            }
        }
        (nodes, messages, vars)
    }

    #[test]
    fn literal_then_binary_operand() {
        let (nodes, _, _) = build("3.4*5.3");
        assert_eq!(nodes.len(), 1);
        let n = &nodes[0];
        assert_eq!(n.state, State::Parsed);
        assert_eq!(n.op.unwrap().name, "multiply");
        assert_eq!(n.prior.len(), 1);
        assert_eq!(n.params.len(), 1);
    }

    #[test]
    fn adjacent_operands_multiply_implicitly() {
        let (nodes, _, _) = build("2pi");
        assert_eq!(nodes.len(), 1);
        let n = &nodes[0];
        assert_eq!(n.op.unwrap().name, "multiply");
        assert_eq!(n.prior[0].value(), Value::Int(2));
        assert!(n.params[0].is_constant());
    }

    #[test]
    fn whitespace_adjacency_also_multiplies() {
        let (nodes, _, _) = build("3.4 5.3");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].op.unwrap().name, "multiply");
    }

    #[test]
    fn conversion_binds_a_unit_literal() {
        let (nodes, _, _) = build("25C::F");
        assert_eq!(nodes.len(), 1);
        let conv = &nodes[0];
        assert_eq!(conv.op.unwrap().name, "convert");
        assert_eq!(conv.prior[0].unit().key(), "C");
        assert_eq!(conv.params.len(), 1);
        assert_eq!(conv.params[0].unit().key(), "F");
    }

    #[test]
    fn unary_call_form_defers_past_the_group() {
        let (nodes, _, _) = build("sin(30)");
        assert_eq!(nodes.len(), 1);
        let n = &nodes[0];
        assert_eq!(n.op.unwrap().name, "sine");
        assert_eq!(n.state, State::Group);
        assert!(!n.children.is_empty());
    }

    #[test]
    fn bare_unary_applies_to_what_came_before() {
        let (nodes, _, _) = build("30 sin");
        assert_eq!(nodes.len(), 1);
        let n = &nodes[0];
        assert_eq!(n.op.unwrap().name, "sine");
        assert_eq!(n.state, State::Function);
        assert_eq!(n.prior.len(), 1);
    }

    #[test]
    fn sign_after_close_paren_is_binary() {
        let (nodes, _, _) = build("(9-1)-4");
        // Group, close token, then a subtract node. "-4" must not scan
        // as a negative literal.
        let last = nodes.last().unwrap();
        assert_eq!(last.op.unwrap().name, "subtract");
        assert_eq!(last.params[0].value(), Value::Int(4));
    }

    #[test]
    fn negative_literal_at_start_stays_a_literal() {
        let (nodes, _, _) = build("-4.2+1");
        assert_eq!(nodes[0].prior[0].value(), Value::Float(-4.2));
    }

    #[test]
    fn parse_time_assignment_leaves_an_empty_node() {
        let (nodes, _, vars) = build("y=3.2");
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].op.is_none());
        assert!(nodes[0].prior.is_empty() && nodes[0].params.is_empty());
        assert_eq!(vars.lookup("y").unwrap().value(), Value::Float(3.2));
    }

    #[test]
    fn unclosed_group_is_reported() {
        let (_, messages, _) = build("(5");
        assert!(messages.has_errors());
    }
}
