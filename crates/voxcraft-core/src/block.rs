//! Block registry.
//!
//! The set of block types is closed, so the registry is a plain constant
//! table indexed by the enum discriminant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Kind of block a cell can hold.
///
/// Serialized as its lowercase tag (`"dirt"`, `"grass"`, ...), which is also
/// the tag the architect service answers with.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Dirt,
    #[default]
    Grass,
    Glass,
    Wood,
    Log,
    Cobblestone,
    Stone,
    Plank,
    Leaves,
}

/// Rendering attributes for a block type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockAttributes {
    /// Wire/display tag
    pub tag: &'static str,
    /// Base color (RGB, 0-255)
    pub color: [u8; 3],
    /// Opacity (1.0 = opaque)
    pub opacity: f32,
}

impl BlockAttributes {
    /// Returns true if the block is rendered with blending.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    /// Color as a `#rrggbb` string.
    pub fn hex_color(&self) -> String {
        let [r, g, b] = self.color;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

const fn opaque(tag: &'static str, color: [u8; 3]) -> BlockAttributes {
    BlockAttributes {
        tag,
        color,
        opacity: 1.0,
    }
}

/// Attribute table, in [`BlockType::ALL`] order.
const ATTRIBUTES: [BlockAttributes; BlockType::COUNT] = [
    opaque("dirt", [0x7c, 0x2d, 0x12]),
    opaque("grass", [0x16, 0x65, 0x34]),
    BlockAttributes {
        tag: "glass",
        color: [0x93, 0xc5, 0xfd],
        opacity: 0.6,
    },
    opaque("wood", [0x92, 0x40, 0x0e]),
    opaque("log", [0x45, 0x1a, 0x03]),
    opaque("cobblestone", [0x57, 0x53, 0x4e]),
    opaque("stone", [0x78, 0x71, 0x6c]),
    opaque("plank", [0xd9, 0x77, 0x06]),
    opaque("leaves", [0x15, 0x80, 0x3d]),
];

impl BlockType {
    /// Number of block types.
    pub const COUNT: usize = 9;

    /// Every block type, in hotbar order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Dirt,
        Self::Grass,
        Self::Glass,
        Self::Wood,
        Self::Log,
        Self::Cobblestone,
        Self::Stone,
        Self::Plank,
        Self::Leaves,
    ];

    /// Rendering attributes for this block type.
    #[inline]
    pub const fn attributes(self) -> &'static BlockAttributes {
        &ATTRIBUTES[self as usize]
    }

    /// Wire tag of this block type.
    #[inline]
    pub const fn tag(self) -> &'static str {
        self.attributes().tag
    }

    /// Base color (RGB).
    #[inline]
    pub const fn color(self) -> [u8; 3] {
        self.attributes().color
    }

    /// Returns true for translucent blocks (glass).
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.attributes().is_transparent()
    }

    /// Hotbar slot, 1 through 9.
    #[inline]
    pub const fn slot(self) -> u8 {
        self as u8 + 1
    }

    /// Block type bound to a hotbar slot (1 through 9).
    pub fn from_slot(slot: u8) -> Option<Self> {
        let index = usize::from(slot.checked_sub(1)?);
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for BlockType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|block| block.tag() == s)
            .ok_or_else(|| Error::UnknownBlockType(s.to_string()))
    }
}
