use std::collections::{HashMap, HashSet, VecDeque};

use crate::symbol::Symbol;

/// A single automaton state. Equality is by value over both fields, so two
/// independently built automata with the same shape compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    pub id: u32,
    pub accepting: bool,
}

/// Hands out states with monotonically increasing IDs, starting from 1.
///
/// Each construction run gets its own factory, which keeps state IDs
/// reproducible per compilation and keeps compiling free of shared mutable
/// state.
#[derive(Debug)]
pub struct StateFactory {
    next_id: u32,
}

impl StateFactory {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    pub fn create(&mut self, accepting: bool) -> State {
        let id = self.next_id;
        self.next_id += 1;
        State { id, accepting }
    }
}

impl Default for StateFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// A nondeterministic finite automaton.
///
/// A state may carry any number of outgoing transitions, including several
/// on the same symbol, plus epsilon transitions that consume no input.
/// Once built the automaton is immutable; `matches` can be called any
/// number of times, from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    start: State,
    transitions: HashMap<State, HashSet<(Symbol, State)>>,
    epsilon_transitions: HashMap<State, HashSet<State>>,
}

impl Nfa {
    pub fn builder(start: State) -> NfaBuilder {
        NfaBuilder {
            start,
            transitions: HashMap::new(),
            epsilon_transitions: HashMap::new(),
        }
    }

    /// Simulates the automaton over `input` and reports whether it ends in
    /// an accepting state.
    ///
    /// The configuration is the set of states the automaton could be in.
    /// Before each character (and once after the last) it is expanded to
    /// its epsilon-closure; consuming a character replaces it with every
    /// transition target whose symbol matches. An empty configuration can
    /// never recover, so it rejects immediately.
    pub fn matches(&self, input: &str) -> bool {
        let mut current: HashSet<State> = HashSet::from([self.start]);
        for c in input.chars() {
            if current.is_empty() {
                return false;
            }
            self.expand_with_epsilon_transitions(&mut current);
            current = self.next_states(&current, c);
        }
        self.expand_with_epsilon_transitions(&mut current);
        current.iter().any(|state| state.accepting)
    }

    /// Grows `states` to its epsilon-closure in place. Worklist with the
    /// set itself as the visited check, so epsilon cycles terminate.
    fn expand_with_epsilon_transitions(&self, states: &mut HashSet<State>) {
        let mut unexpanded: VecDeque<State> = states.iter().copied().collect();
        while let Some(state) = unexpanded.pop_front() {
            let Some(targets) = self.epsilon_transitions.get(&state) else {
                continue;
            };
            for &target in targets {
                if states.insert(target) {
                    unexpanded.push_back(target);
                }
            }
        }
    }

    fn next_states(&self, states: &HashSet<State>, c: char) -> HashSet<State> {
        let mut next = HashSet::new();
        for state in states {
            let Some(transitions) = self.transitions.get(state) else {
                continue;
            };
            for (symbol, target) in transitions {
                if symbol.matches(c) {
                    next.insert(*target);
                }
            }
        }
        next
    }
}

pub struct NfaBuilder {
    start: State,
    transitions: HashMap<State, HashSet<(Symbol, State)>>,
    epsilon_transitions: HashMap<State, HashSet<State>>,
}

impl NfaBuilder {
    pub fn transition(&mut self, from: State, on: Symbol, to: State) -> &mut Self {
        self.transitions.entry(from).or_default().insert((on, to));
        self
    }

    pub fn epsilon(&mut self, from: State, to: State) -> &mut Self {
        self.epsilon_transitions.entry(from).or_default().insert(to);
        self
    }

    pub fn build(self) -> Nfa {
        Nfa {
            start: self.start,
            transitions: self.transitions,
            epsilon_transitions: self.epsilon_transitions,
        }
    }
}
