//! Construction stages

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of the box construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildStage {
    /// Compute the eight corner points
    #[default]
    Vertices,
    /// Build the bottom face from p0..p3
    BottomFace,
    /// Build the top face from p4..p7
    TopFace,
    /// Build the front, right, back and left faces
    SideFaces,
    /// Sew all six faces into a shell
    Sew,
    /// Turn the shell into a solid
    Solidify,
    /// Terminal no-op stage
    Done,
}

/// Stage transition table; `Done` loops onto itself
pub const TRANSITIONS: [(BuildStage, BuildStage); 7] = [
    (BuildStage::Vertices, BuildStage::BottomFace),
    (BuildStage::BottomFace, BuildStage::TopFace),
    (BuildStage::TopFace, BuildStage::SideFaces),
    (BuildStage::SideFaces, BuildStage::Sew),
    (BuildStage::Sew, BuildStage::Solidify),
    (BuildStage::Solidify, BuildStage::Done),
    (BuildStage::Done, BuildStage::Done),
];

impl BuildStage {
    /// All stages in execution order
    pub const ALL: [BuildStage; 7] = [
        BuildStage::Vertices,
        BuildStage::BottomFace,
        BuildStage::TopFace,
        BuildStage::SideFaces,
        BuildStage::Sew,
        BuildStage::Solidify,
        BuildStage::Done,
    ];

    /// Stage that follows this one
    pub fn next(self) -> BuildStage {
        TRANSITIONS
            .iter()
            .find(|(from, _)| *from == self)
            .map_or(BuildStage::Done, |(_, to)| *to)
    }

    /// Zero-based step number
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stage for a step number; anything past the last step is `Done`
    pub fn from_index(index: usize) -> BuildStage {
        Self::ALL
            .get(index)
            .copied()
            .unwrap_or(BuildStage::Done)
    }

    pub fn is_done(self) -> bool {
        self == BuildStage::Done
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            BuildStage::Vertices => "Vertices",
            BuildStage::BottomFace => "Bottom face",
            BuildStage::TopFace => "Top face",
            BuildStage::SideFaces => "Side faces",
            BuildStage::Sew => "Sew shell",
            BuildStage::Solidify => "Make solid",
            BuildStage::Done => "Done",
        }
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_walk_all_stages() {
        let mut stage = BuildStage::default();
        let mut visited = vec![stage];
        while !stage.is_done() {
            stage = stage.next();
            visited.push(stage);
        }
        assert_eq!(visited, BuildStage::ALL.to_vec());
        assert_eq!(BuildStage::Done.next(), BuildStage::Done);
    }

    #[test]
    fn test_index_round_trip() {
        for stage in BuildStage::ALL {
            assert_eq!(BuildStage::from_index(stage.index()), stage);
        }
        assert_eq!(BuildStage::from_index(42), BuildStage::Done);
        assert_eq!(BuildStage::SideFaces.index(), 3);
    }
}
