//! A small regular-expression engine.
//!
//! A pattern string is tokenized, parsed into an expression tree, and
//! translated into a nondeterministic finite automaton with Thompson's
//! construction. Matching simulates the automaton over the input with
//! on-the-fly epsilon-closure expansion, so it runs in time linear in the
//! input length times the automaton size, with no backtracking.

pub mod ast;
pub mod constructor;
pub mod nfa;
pub mod parser;
pub mod symbol;
pub mod token;

pub use parser::ParseError;

/// A pattern compiled down to its automaton, ready to be matched against
/// any number of inputs. Immutable, cheap to share between threads.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    nfa: nfa::Nfa,
}

/// Compile `pattern` into an automaton, failing on any syntax violation.
pub fn compile(pattern: &str) -> Result<CompiledPattern, ParseError> {
    let tokens = token::tokenize(pattern);
    let expression = parser::parse(&tokens)?;
    log::debug!("compiled pattern {pattern:?} ({} tokens)", tokens.len());
    Ok(CompiledPattern {
        nfa: constructor::construct(expression),
    })
}

impl CompiledPattern {
    /// Whether the whole of `input` is accepted by the pattern. Total and
    /// deterministic: the same pattern and input always give the same
    /// answer.
    pub fn matches(&self, input: &str) -> bool {
        self.nfa.matches(input)
    }
}
