//! The 36 channels, each joining two gates in different centers

/// Gate pairs indexed by `channel - 1`
pub const CHANNELS: [(u8, u8); 36] = [
    (64, 47),
    (61, 24),
    (63, 4),
    (17, 62),
    (43, 23),
    (11, 56),
    (48, 16),
    (57, 20),
    (34, 20),
    (10, 20),
    (57, 10),
    (57, 34),
    (34, 10),
    (7, 31),
    (1, 8),
    (13, 33),
    (21, 45),
    (22, 12),
    (36, 35),
    (5, 15),
    (14, 2),
    (29, 46),
    (51, 25),
    (44, 26),
    (27, 50),
    (59, 6),
    (37, 40),
    (54, 32),
    (38, 28),
    (58, 18),
    (53, 42),
    (60, 3),
    (52, 9),
    (19, 49),
    (39, 55),
    (41, 30),
];

/// Gates of a channel (1..=36)
pub fn channel_gates(number: u8) -> Option<(u8, u8)> {
    match number {
        1..=36 => Some(CHANNELS[number as usize - 1]),
        _ => None,
    }
}

/// Channel numbers a gate takes part in
pub fn channels_of_gate(gate: u8) -> impl Iterator<Item = u8> {
    CHANNELS
        .iter()
        .enumerate()
        .filter(move |(_, pair)| pair.0 == gate || pair.1 == gate)
        .map(|(i, _)| i as u8 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodygraph::centers::Center;

    #[test]
    fn test_channels_join_distinct_centers() {
        for &(a, b) in CHANNELS.iter() {
            let ca = Center::of_gate(a).unwrap();
            let cb = Center::of_gate(b).unwrap();
            assert_ne!(ca, cb, "channel {}-{}", a, b);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(channel_gates(1), Some((64, 47)));
        assert_eq!(channel_gates(36), Some((41, 30)));
        assert_eq!(channel_gates(0), None);
        assert_eq!(channels_of_gate(20).collect::<Vec<_>>(), vec![8, 9, 10]);
        assert_eq!(channels_of_gate(57).collect::<Vec<_>>(), vec![8, 11, 12]);
        assert_eq!(channels_of_gate(10).count(), 3);
    }
}
