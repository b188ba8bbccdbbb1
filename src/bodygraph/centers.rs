//! The nine centers and the gates that belong to each

use lazy_static::lazy_static;
use serde::Serialize;
use std::fmt;

/// A center of the bodygraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Center {
    Head,
    Ajna,
    Throat,
    G,
    Sacral,
    Root,
    Ego,
    Spleen,
    Emo,
}

/// Gates of each center
const CENTER_GATES: [(Center, &[u8]); 9] = [
    (Center::Head, &[64, 61, 63]),
    (Center::Ajna, &[47, 24, 4, 17, 43, 11]),
    (Center::Throat, &[62, 23, 56, 35, 12, 45, 33, 8, 31, 20, 16]),
    (Center::G, &[1, 13, 25, 46, 2, 15, 10, 7]),
    (Center::Sacral, &[5, 14, 29, 59, 9, 3, 42, 27, 34]),
    (Center::Root, &[53, 60, 52, 19, 39, 41, 58, 38, 54]),
    (Center::Ego, &[21, 40, 26, 51]),
    (Center::Spleen, &[48, 57, 44, 50, 32, 28, 18]),
    (Center::Emo, &[6, 37, 22, 36, 30, 55, 49]),
];

lazy_static! {
    /// Center of each gate, indexed by gate number
    static ref GATE_CENTER: [Option<Center>; 65] = {
        let mut table = [None; 65];
        for (center, gates) in CENTER_GATES.iter() {
            for &gate in gates.iter() {
                table[gate as usize] = Some(*center);
            }
        }
        table
    };
}

impl Center {
    /// All centers in display order
    pub const ALL: [Center; 9] = [
        Center::Head,
        Center::Ajna,
        Center::Throat,
        Center::G,
        Center::Sacral,
        Center::Root,
        Center::Ego,
        Center::Spleen,
        Center::Emo,
    ];

    /// Motor centers
    pub const MOTORS: [Center; 4] = [Center::Sacral, Center::Ego, Center::Emo, Center::Root];

    /// Position in [`Center::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Center::Head => "Head",
            Center::Ajna => "Ajna",
            Center::Throat => "Throat",
            Center::G => "G",
            Center::Sacral => "Sacral",
            Center::Root => "Root",
            Center::Ego => "Ego",
            Center::Spleen => "Spleen",
            Center::Emo => "Emo",
        }
    }

    pub fn is_motor(&self) -> bool {
        Self::MOTORS.contains(self)
    }

    /// Gates belonging to this center
    pub fn gates(&self) -> &'static [u8] {
        CENTER_GATES[self.index()].1
    }

    /// Center a gate (1..=64) belongs to
    pub fn of_gate(gate: u8) -> Option<Center> {
        GATE_CENTER.get(gate as usize).copied().flatten()
    }
}

impl fmt::Display for Center {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_gate_has_one_center() {
        let mut seen = vec![0; 65];
        for center in Center::ALL {
            for &gate in center.gates() {
                seen[gate as usize] += 1;
                assert_eq!(Center::of_gate(gate), Some(center));
            }
        }
        assert!(seen[1..].iter().all(|&n| n == 1));
        assert_eq!(Center::of_gate(0), None);
        assert_eq!(Center::of_gate(65), None);
    }

    #[test]
    fn test_table_order_matches_enum() {
        for (i, (center, _)) in CENTER_GATES.iter().enumerate() {
            assert_eq!(center.index(), i);
            assert_eq!(Center::ALL[i], *center);
        }
        assert!(Center::Root.is_motor());
        assert!(!Center::Throat.is_motor());
        assert_eq!(Center::Emo.to_string(), "Emo");
    }
}
