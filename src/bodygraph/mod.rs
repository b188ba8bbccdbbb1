//! Gate, channel and center activation graph
//!
//! Gate activations from the Personality and Design snapshots are counted
//! separately. A gate is defined when either count is non-zero, a channel when
//! both of its gates are defined (whichever snapshot activated them) and a
//! center when at least one of its channels is defined.

pub mod centers;
pub mod channels;
pub mod classify;

use log::warn;
use serde::Serialize;
use std::collections::VecDeque;

pub use centers::Center;
pub use channels::CHANNELS;
pub use classify::{Authority, Classification, Cross, CrossAngle, Definition, HdType, Profile};

/// Snapshot an activation comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Personality,
    Design,
}

/// Activation counts of one gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gate {
    pub number: u8,
    pub center: Center,
    /// Times activated by the Personality snapshot
    pub personality: u32,
    /// Times activated by the Design snapshot
    pub design: u32,
    pub defined: bool,
}

/// A channel between two gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Channel {
    pub number: u8,
    pub gates: (u8, u8),
    pub centers: (Center, Center),
    pub defined: bool,
}

/// Definedness of a center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CenterState {
    pub center: Center,
    pub defined: bool,
}

/// The 64 gates, 36 channels and 9 centers of a chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bodygraph {
    gates: Vec<Gate>,
    channels: Vec<Channel>,
    centers: Vec<CenterState>,
}

impl Default for Bodygraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Bodygraph {
    /// A bodygraph with nothing activated
    pub fn new() -> Self {
        let gates = (1..=64u8)
            .filter_map(|number| {
                Center::of_gate(number).map(|center| Gate {
                    number,
                    center,
                    personality: 0,
                    design: 0,
                    defined: false,
                })
            })
            .collect();

        let channels = CHANNELS
            .iter()
            .enumerate()
            .filter_map(|(i, &(a, b))| {
                Some(Channel {
                    number: i as u8 + 1,
                    gates: (a, b),
                    centers: (Center::of_gate(a)?, Center::of_gate(b)?),
                    defined: false,
                })
            })
            .collect();

        let centers = Center::ALL
            .iter()
            .map(|&center| CenterState {
                center,
                defined: false,
            })
            .collect();

        Self {
            gates,
            channels,
            centers,
        }
    }

    /// Build from the gates activated by each snapshot
    pub fn from_activations<P, D>(personality: P, design: D) -> Self
    where
        P: IntoIterator<Item = u8>,
        D: IntoIterator<Item = u8>,
    {
        let mut graph = Self::new();
        for gate in personality {
            graph.count(gate, Side::Personality);
        }
        for gate in design {
            graph.count(gate, Side::Design);
        }
        graph.resolve();
        graph
    }

    /// Record one activation and update definedness
    pub fn activate(&mut self, gate: u8, side: Side) {
        self.count(gate, side);
        self.resolve();
    }

    fn count(&mut self, gate: u8, side: Side) {
        let Some(entry) = self.gates.get_mut(gate.wrapping_sub(1) as usize) else {
            warn!("ignoring activation of unknown gate {}", gate);
            return;
        };
        match side {
            Side::Personality => entry.personality += 1,
            Side::Design => entry.design += 1,
        }
    }

    fn resolve(&mut self) {
        for gate in &mut self.gates {
            gate.defined = gate.personality > 0 || gate.design > 0;
        }

        let gates = &self.gates;
        let is_defined = |n: u8| gates[n as usize - 1].defined;
        for channel in &mut self.channels {
            channel.defined = is_defined(channel.gates.0) && is_defined(channel.gates.1);
        }

        for state in &mut self.centers {
            state.defined = self.channels.iter().any(|c| {
                c.defined && (c.centers.0 == state.center || c.centers.1 == state.center)
            });
        }
    }

    /// All gates, ordered by number
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// All channels, ordered by number
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// All centers, in [`Center::ALL`] order
    pub fn centers(&self) -> &[CenterState] {
        &self.centers
    }

    /// Gate by number (1..=64)
    pub fn gate(&self, number: u8) -> Option<&Gate> {
        self.gates.get(number.wrapping_sub(1) as usize)
    }

    /// Channel by number (1..=36)
    pub fn channel(&self, number: u8) -> Option<&Channel> {
        self.channels.get(number.wrapping_sub(1) as usize)
    }

    pub fn is_defined(&self, center: Center) -> bool {
        self.centers[center.index()].defined
    }

    pub fn defined_channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter().filter(|c| c.defined)
    }

    pub fn defined_centers(&self) -> impl Iterator<Item = Center> + '_ {
        self.centers.iter().filter(|s| s.defined).map(|s| s.center)
    }

    /// Centers reachable from `from` along defined channels, `from` included
    pub fn connected_to(&self, from: Center) -> Vec<Center> {
        let mut seen = [false; 9];
        let mut queue = VecDeque::from([from]);
        let mut reached = Vec::new();
        seen[from.index()] = true;

        while let Some(center) = queue.pop_front() {
            reached.push(center);
            for channel in self.defined_channels() {
                let next = match channel.centers {
                    (a, b) if a == center => b,
                    (a, b) if b == center => a,
                    _ => continue,
                };
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }

        reached
    }

    /// Whether two centers are joined by a path of defined channels
    pub fn connected(&self, a: Center, b: Center) -> bool {
        a != b && self.connected_to(a).contains(&b)
    }

    /// Groups of defined centers joined by defined channels
    pub fn components(&self) -> Vec<Vec<Center>> {
        let mut assigned = [false; 9];
        let mut components = Vec::new();

        for center in self.defined_centers() {
            if assigned[center.index()] {
                continue;
            }
            let group = self.connected_to(center);
            for c in &group {
                assigned[c.index()] = true;
            }
            components.push(group);
        }

        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let graph = Bodygraph::new();
        assert_eq!(graph.gates().len(), 64);
        assert_eq!(graph.channels().len(), 36);
        assert_eq!(graph.centers().len(), 9);
        assert!(graph.defined_centers().next().is_none());
        assert!(graph.components().is_empty());
    }

    #[test]
    fn test_single_gate_defines_nothing_else() {
        let graph = Bodygraph::from_activations([64], []);
        assert!(graph.gate(64).unwrap().defined);
        assert_eq!(graph.gate(64).unwrap().personality, 1);
        assert!(!graph.channel(1).unwrap().defined);
        assert!(!graph.is_defined(Center::Head));
    }

    #[test]
    fn test_channel_across_snapshots_is_defined() {
        // Gate 64 from the Personality, gate 47 from the Design
        let graph = Bodygraph::from_activations([64], [47]);
        let channel = graph.channel(1).unwrap();
        assert!(channel.defined);
        assert_eq!(channel.centers, (Center::Head, Center::Ajna));
        assert!(graph.is_defined(Center::Head));
        assert!(graph.is_defined(Center::Ajna));
        assert!(!graph.is_defined(Center::Throat));
    }

    #[test]
    fn test_counts_accumulate() {
        let mut graph = Bodygraph::from_activations([34, 34], [34]);
        let gate = graph.gate(34).unwrap();
        assert_eq!((gate.personality, gate.design), (2, 1));

        graph.activate(20, Side::Design);
        assert!(graph.channel(9).unwrap().defined);
        assert!(graph.is_defined(Center::Sacral));
        assert!(graph.is_defined(Center::Throat));
    }

    #[test]
    fn test_unknown_gates_are_ignored() {
        let graph = Bodygraph::from_activations([0, 65, 255], []);
        assert_eq!(graph, Bodygraph::new());
        assert!(graph.gate(0).is_none());
        assert!(graph.channel(37).is_none());
    }

    #[test]
    fn test_connectivity() {
        // Root -> Sacral (53-42), Sacral -> Throat (34-20), Head -> Ajna (64-47)
        let graph = Bodygraph::from_activations([53, 42, 34], [20, 64, 47]);
        assert!(graph.connected(Center::Root, Center::Throat));
        assert!(!graph.connected(Center::Root, Center::Ajna));
        assert!(!graph.connected(Center::Root, Center::Root));

        let components = graph.components();
        assert_eq!(components.len(), 2);
        assert!(components.iter().any(|c| c.len() == 3 && c.contains(&Center::Sacral)));
        assert!(components.iter().any(|c| c.len() == 2 && c.contains(&Center::Head)));
    }
}
