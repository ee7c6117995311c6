//! Translates a parsed expression into an equivalent NFA using Thompson's
//! construction: each expression kind contributes a small fragment of
//! states and epsilon edges, and fragments compose by feeding one's exit
//! state into the next's entry.

use crate::ast::Regexp;
use crate::nfa::{Nfa, NfaBuilder, State, StateFactory};

/// Builds the automaton for `expression`. Consumes the expression; the
/// parse tree has no further use once the automaton exists.
///
/// State IDs are assigned by a factory local to this call, counting up
/// from 1, so compiling the same pattern always yields the same automaton.
/// The accepting state is created last, as the single final state of the
/// whole automaton, reached by an epsilon edge from the outermost
/// expression's exit.
pub fn construct(expression: Regexp) -> Nfa {
    let mut factory = StateFactory::new();
    let start = factory.create(false);
    let mut construction = Construction {
        factory,
        builder: Nfa::builder(start),
    };
    let exit = construction.thread(expression, start);
    let accepting = construction.factory.create(true);
    construction.builder.epsilon(exit, accepting);
    construction.builder.build()
}

struct Construction {
    factory: StateFactory,
    builder: NfaBuilder,
}

impl Construction {
    /// Adds the fragment for `expression` starting at `entry` and returns
    /// the state where the fragment exits.
    fn thread(&mut self, expression: Regexp, entry: State) -> State {
        match expression {
            Regexp::Concatenation(subexpressions) => subexpressions
                .into_iter()
                .fold(entry, |exit, subexpression| self.thread(subexpression, exit)),
            Regexp::Or(left, right) => self.thread_or(*left, *right, entry),
            // Groups only exist for precedence; the automaton never sees them.
            Regexp::Group(subexpression) => self.thread(*subexpression, entry),
            Regexp::CharMatcher(symbol) => {
                let exit = self.state();
                self.builder.transition(entry, symbol, exit);
                exit
            }
            Regexp::ZeroOrMoreTimes(subexpression) => {
                self.thread_zero_or_more(*subexpression, entry)
            }
            Regexp::OneOrMoreTimes(subexpression) => {
                self.thread_one_or_more(*subexpression, entry)
            }
            Regexp::ZeroOrOneTime(subexpression) => {
                self.thread_zero_or_one(*subexpression, entry)
            }
        }
    }

    fn thread_or(&mut self, left: Regexp, right: Regexp, entry: State) -> State {
        let left_entry = self.state();
        let right_entry = self.state();
        self.builder
            .epsilon(entry, left_entry)
            .epsilon(entry, right_entry);
        let join = self.state();
        let left_exit = self.thread(left, left_entry);
        self.builder.epsilon(left_exit, join);
        let right_exit = self.thread(right, right_entry);
        self.builder.epsilon(right_exit, join);
        join
    }

    fn thread_zero_or_more(&mut self, subexpression: Regexp, entry: State) -> State {
        let body_entry = self.state();
        let exit = self.state();
        // Skip path around the body, loop path back into it.
        self.builder
            .epsilon(entry, body_entry)
            .epsilon(entry, exit);
        let body_exit = self.thread(subexpression, body_entry);
        self.builder
            .epsilon(body_exit, exit)
            .epsilon(body_exit, body_entry);
        exit
    }

    fn thread_one_or_more(&mut self, subexpression: Regexp, entry: State) -> State {
        // One pass through the body is mandatory, so it starts right at the
        // entry; the loop edge goes back to the entry rather than skipping.
        let body_exit = self.thread(subexpression, entry);
        let exit = self.state();
        self.builder
            .epsilon(body_exit, exit)
            .epsilon(body_exit, entry);
        exit
    }

    fn thread_zero_or_one(&mut self, subexpression: Regexp, entry: State) -> State {
        let body_entry = self.state();
        let body_exit = self.thread(subexpression, body_entry);
        self.builder
            .epsilon(entry, body_entry)
            .epsilon(entry, body_exit);
        body_exit
    }

    fn state(&mut self) -> State {
        self.factory.create(false)
    }
}
