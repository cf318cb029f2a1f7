//! DFA minimization by Moore-style partition refinement.

use crate::automaton::finite_automaton::FiniteAutomaton;
use crate::automaton::state::{StateId, StateSet};
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::{HashMap, VecDeque};

/// A state's view of the current partition: its own block, then the block
/// reached on every symbol of the alphabet, in ascending symbol order.
type Signature = (usize, Vec<Option<usize>>);

impl FiniteAutomaton {
    /// Find all states reachable from the initial state, following epsilon
    /// and symbol transitions alike.
    pub fn reachable_states(&self) -> StateSet {
        self.reachable_in_bfs_order().into_iter().collect()
    }

    /// Reachable states listed in the order a breadth-first search from the
    /// initial state discovers them.
    fn reachable_in_bfs_order(&self) -> Vec<StateId> {
        let mut visited = self.empty_dense_set();
        let mut order: Vec<StateId> = Vec::new();
        let mut queue: VecDeque<usize> = VecDeque::new();

        visited.insert(self.initial_index());
        queue.push_back(self.initial_index());

        while let Some(index) = queue.pop_front() {
            let state = self.state_at(index);
            order.push(state);
            for (_, targets) in self.transitions_from(state) {
                for target in targets.iter().filter_map(|target| self.index_of(target)) {
                    if !visited.put(target) {
                        queue.push_back(target);
                    }
                }
            }
        }

        order
    }

    /// Return the smallest DFA accepting the same language.
    ///
    /// Automata that are not complete DFAs are determinized first, and
    /// unreachable states are pruned before refining. The initial state of
    /// the result is `0`; the other states follow the order in which a
    /// breadth-first search discovers them.
    pub fn minimize(&self) -> FiniteAutomaton {
        let determinized;
        let dfa = if self.is_complete() {
            self
        } else {
            determinized = self.determinize();
            &determinized
        };

        let states = dfa.reachable_in_bfs_order();
        let (block_of, num_blocks) = dfa.refine_partition(&states);

        // Any member of a block can stand for the others
        let mut members: IndexMap<usize, Vec<StateId>> = IndexMap::new();
        for &state in &states {
            members.entry(block_of[&state]).or_default().push(state);
        }

        let mut minimized = FiniteAutomaton::new(0);
        for &symbol in dfa.alphabet() {
            minimized.add_symbol(symbol);
        }

        for (&block, block_members) in &members {
            let representative = block_members[0];
            let block_state = block as StateId;
            minimized.add_state(block_state);
            if dfa.is_final(representative) {
                minimized.add_final_state(block_state);
            }
            for &symbol in dfa.alphabet() {
                if let Some(target) = dfa.successors(representative, symbol).and_then(StateSet::first) {
                    minimized.add_transition(block_state, symbol, block_of[&target] as StateId);
                }
            }
        }

        // Map every block back to the original states it stands for
        let mut mapping: IndexMap<StateId, Vec<StateId>> = IndexMap::new();
        for (&block, block_members) in &members {
            let mut originals: Vec<StateId> = match dfa.state_mapping() {
                Some(orig_mapping) => block_members
                    .iter()
                    .filter_map(|state| orig_mapping.get(state))
                    .flatten()
                    .copied()
                    .collect(),
                None => block_members.clone(),
            };
            originals.sort_unstable();
            originals.dedup();
            mapping.insert(block as StateId, originals);
        }
        minimized.set_state_mapping(mapping);

        debug!(
            "Minimized {} reachable states into {} states",
            states.len(),
            num_blocks
        );

        minimized
    }

    /// Refine the {final, non-final} partition of `states` until no block
    /// splits any further. Returns the block of every state and the number
    /// of blocks. Blocks are numbered by the first state of `states` they
    /// contain.
    fn refine_partition(&self, states: &[StateId]) -> (HashMap<StateId, usize>, usize) {
        let mut block_of: HashMap<StateId, usize> = HashMap::with_capacity(states.len());
        let mut accepting_block: [Option<usize>; 2] = [None, None];
        for &state in states {
            let next_block = accepting_block.iter().flatten().count();
            let block = *accepting_block[self.is_final(state) as usize].get_or_insert(next_block);
            block_of.insert(state, block);
        }
        let mut num_blocks = accepting_block.iter().flatten().count();
        Self::trace_partition("initial", states, &block_of);

        let mut rounds = 0;
        loop {
            rounds += 1;
            let mut signatures: IndexMap<Signature, usize> = IndexMap::new();
            let mut next_block_of: HashMap<StateId, usize> = HashMap::with_capacity(states.len());

            for &state in states {
                let signature = self.signature(state, &block_of);
                let fresh_id = signatures.len();
                let block = *signatures.entry(signature).or_insert(fresh_id);
                next_block_of.insert(state, block);
            }

            // Signatures embed the old block, so blocks only ever split:
            // an unchanged count means an unchanged partition.
            let changed = signatures.len() != num_blocks;
            num_blocks = signatures.len();
            block_of = next_block_of;
            Self::trace_partition("refined", states, &block_of);

            if !changed {
                break;
            }
        }

        debug!("Partition refinement reached a fixpoint after {} rounds", rounds);
        (block_of, num_blocks)
    }

    fn signature(&self, state: StateId, block_of: &HashMap<StateId, usize>) -> Signature {
        let targets = self
            .alphabet()
            .iter()
            .map(|&symbol| {
                self.successors(state, symbol)
                    .and_then(StateSet::first)
                    .map(|target| block_of[&target])
            })
            .collect();
        (block_of[&state], targets)
    }

    fn trace_partition(context: &str, states: &[StateId], block_of: &HashMap<StateId, usize>) {
        if log::log_enabled!(log::Level::Trace) {
            let mut blocks: IndexMap<usize, Vec<StateId>> = IndexMap::new();
            for &state in states {
                blocks.entry(block_of[&state]).or_default().push(state);
            }
            trace!("Partition {}:", context);
            for (block, members) in &blocks {
                trace!("Block {}: {:?}", block, members);
            }
        }
    }
}
