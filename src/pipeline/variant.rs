use std::fmt;

/// One of the rendered outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Cut-out only, alpha preserved.
    Transparent,
    /// Object on a flat ambient-colored square.
    Solid,
    /// Object on a light-to-dark ambient gradient.
    Gradient,
}

impl Variant {
    /// Every variant, in output order.
    pub const ALL: [Variant; 3] = [Variant::Transparent, Variant::Solid, Variant::Gradient];

    /// File name suffix: `<stem>_<suffix>.png`.
    pub const fn suffix(self) -> &'static str {
        match self {
            Variant::Transparent => "transparent",
            Variant::Solid => "solid",
            Variant::Gradient => "gradient",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
