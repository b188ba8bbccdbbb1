//! Type, authority, definition, profile and incarnation cross of a chart

use serde::Serialize;
use std::fmt;

use crate::bodygraph::{Bodygraph, Center};
use crate::hexagram::HdStructure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HdType {
    Manifestor,
    Generator,
    ManifestingGenerator,
    Projector,
    Reflector,
}

impl HdType {
    pub fn name(&self) -> &'static str {
        match self {
            HdType::Manifestor => "Manifestor",
            HdType::Generator => "Generator",
            HdType::ManifestingGenerator => "Manifesting Generator",
            HdType::Projector => "Projector",
            HdType::Reflector => "Reflector",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Authority {
    Emotional,
    Sacral,
    Splenic,
    Ego,
    SelfProjected,
    Lunar,
    Mental,
}

impl Authority {
    pub fn name(&self) -> &'static str {
        match self {
            Authority::Emotional => "Emotional",
            Authority::Sacral => "Sacral",
            Authority::Splenic => "Splenic",
            Authority::Ego => "Ego",
            Authority::SelfProjected => "Self-Projected",
            Authority::Lunar => "Lunar",
            Authority::Mental => "Mental",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Definition {
    None,
    Single,
    Split,
    TripleSplit,
    QuadrupleSplit,
}

impl Definition {
    pub fn name(&self) -> &'static str {
        match self {
            Definition::None => "No Definition",
            Definition::Single => "Single Definition",
            Definition::Split => "Split Definition",
            Definition::TripleSplit => "Triple Split Definition",
            Definition::QuadrupleSplit => "Quadruple Split Definition",
        }
    }
}

/// Personality Sun line over Design Sun line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Profile {
    pub personality: u8,
    pub design: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CrossAngle {
    Right,
    Juxtaposition,
    Left,
}

impl CrossAngle {
    /// Angle of the incarnation cross for a profile; `None` for line pairs
    /// that never occur in a chart
    pub fn from_profile(profile: Profile) -> Option<Self> {
        match (profile.personality, profile.design) {
            (1, 3) | (1, 4) | (2, 4) | (2, 5) | (3, 5) | (3, 6) | (4, 6) => Some(CrossAngle::Right),
            (4, 1) => Some(CrossAngle::Juxtaposition),
            (5, 1) | (5, 2) | (6, 2) | (6, 3) => Some(CrossAngle::Left),
            _ => None,
        }
    }
}

/// Incarnation cross: Personality Sun and Earth, Design Sun and Earth gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cross {
    pub gates: [u8; 4],
    pub angle: Option<CrossAngle>,
}

/// Everything derived from a bodygraph and the Sun/Earth activations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub hd_type: HdType,
    pub authority: Authority,
    pub definition: Definition,
    pub profile: Profile,
    pub cross: Cross,
}

/// Sun and Earth activations of both snapshots
#[derive(Debug, Clone, Copy)]
pub struct SunEarth<'a> {
    pub personality_sun: &'a HdStructure,
    pub personality_earth: &'a HdStructure,
    pub design_sun: &'a HdStructure,
    pub design_earth: &'a HdStructure,
}

/// Classify a chart
pub fn classify(graph: &Bodygraph, sun_earth: SunEarth<'_>) -> Classification {
    let hd_type = hd_type(graph);
    let profile = Profile {
        personality: sun_earth.personality_sun.line,
        design: sun_earth.design_sun.line,
    };

    Classification {
        hd_type,
        authority: authority(graph, hd_type),
        definition: definition(graph),
        profile,
        cross: Cross {
            gates: [
                sun_earth.personality_sun.gate,
                sun_earth.personality_earth.gate,
                sun_earth.design_sun.gate,
                sun_earth.design_earth.gate,
            ],
            angle: CrossAngle::from_profile(profile),
        },
    }
}

fn motor_to_throat(graph: &Bodygraph) -> bool {
    let reached = graph.connected_to(Center::Throat);
    Center::MOTORS.iter().any(|m| reached.contains(m) && graph.is_defined(*m))
}

pub fn hd_type(graph: &Bodygraph) -> HdType {
    if graph.defined_centers().next().is_none() {
        return HdType::Reflector;
    }

    match (graph.is_defined(Center::Sacral), motor_to_throat(graph)) {
        (true, true) => HdType::ManifestingGenerator,
        (true, false) => HdType::Generator,
        (false, true) => HdType::Manifestor,
        (false, false) => HdType::Projector,
    }
}

pub fn authority(graph: &Bodygraph, hd_type: HdType) -> Authority {
    if graph.is_defined(Center::Emo) {
        Authority::Emotional
    } else if graph.is_defined(Center::Sacral) {
        Authority::Sacral
    } else if graph.is_defined(Center::Spleen) {
        Authority::Splenic
    } else if graph.is_defined(Center::Ego) {
        Authority::Ego
    } else if graph.connected(Center::G, Center::Throat) {
        Authority::SelfProjected
    } else if hd_type == HdType::Reflector {
        Authority::Lunar
    } else {
        Authority::Mental
    }
}

pub fn definition(graph: &Bodygraph) -> Definition {
    match graph.components().len() {
        0 => Definition::None,
        1 => Definition::Single,
        2 => Definition::Split,
        3 => Definition::TripleSplit,
        _ => Definition::QuadrupleSplit,
    }
}

impl fmt::Display for HdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.personality, self.design)
    }
}

impl fmt::Display for Cross {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let angle = match self.angle {
            Some(CrossAngle::Right) => "Right Angle",
            Some(CrossAngle::Juxtaposition) => "Juxtaposition",
            Some(CrossAngle::Left) => "Left Angle",
            None => "Cross",
        };
        let [a, b, c, d] = self.gates;
        write!(f, "{} ({}/{} | {}/{})", angle, a, b, c, d)
    }
}
