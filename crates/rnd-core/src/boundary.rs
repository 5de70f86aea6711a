//! Lane boundary marking type.

/// Lane-edge marking. `Unspecified` is the default, and the emitter omits
/// the directive entirely rather than writing it out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Boundary {
    #[default]
    Unspecified,
    DoubleYellow,
    SolidWhite,
    BrokenWhite,
    SolidYellow,
}

impl Boundary {
    /// Parse the literal keyword used in RND text. Returns `None` for any
    /// token that isn't one of the four recognized boundary keywords.
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "double_yellow" => Some(Boundary::DoubleYellow),
            "solid_white" => Some(Boundary::SolidWhite),
            "broken_white" => Some(Boundary::BrokenWhite),
            "solid_yellow" => Some(Boundary::SolidYellow),
            _ => None,
        }
    }

    /// Render back to the RND keyword, or `None` for `Unspecified` (the
    /// emitter omits the directive entirely in that case).
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Boundary::Unspecified => None,
            Boundary::DoubleYellow => Some("double_yellow"),
            Boundary::SolidWhite => Some("solid_white"),
            Boundary::BrokenWhite => Some("broken_white"),
            Boundary::SolidYellow => Some("solid_yellow"),
        }
    }
}
