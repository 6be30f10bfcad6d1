use crate::codec::ECLevel;

// Integer id enums
//------------------------------------------------------------------------------

// Ids are a wire contract for persisted templates. Unknown ids deserialize into
// `Unknown` and are written back verbatim.
macro_rules! id_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (default $default:ident) {
            $($variant:ident = $id:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "i32", into = "i32")]
        pub enum $name {
            $($variant,)+
            Unknown(i32),
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn id(self) -> i32 {
                match self {
                    $(Self::$variant => $id,)+
                    Self::Unknown(id) => id,
                }
            }

            pub const fn is_known(self) -> bool {
                !matches!(self, Self::Unknown(_))
            }

            pub const fn or_default(self) -> Self {
                match self {
                    Self::Unknown(_) => Self::$default,
                    known => known,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                match id {
                    $($id => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.id()
            }
        }
    };
}

id_enum! {
    /// Decorative artwork the QR block is overlaid onto.
    pub enum Frame (default NoFrame) {
        NoFrame = 1,
        Coffee = 2,
        Scooter = 3,
        Gift = 4,
        Envelope = 5,
        Clipboard = 6,
        Phone = 7,
        Ticket = 8,
        ShoppingBag = 9,
        Billboard = 10,
    }
}

id_enum! {
    /// Clip applied to the QR block as a whole. Not to be confused with [`DotStyle`],
    /// which shapes every individual module.
    pub enum Shape (default Square) {
        Square = 1,
        Rounded = 2,
        Dots = 3,
        Circle = 4,
    }
}

id_enum! {
    /// Badge drawn on top of the QR block.
    pub enum Logo (default NoLogo) {
        NoLogo = 0,
        Link = 1,
        Location = 2,
        Mail = 3,
        Phone = 4,
        Wifi = 5,
        Scan = 6,
    }
}

id_enum! {
    pub enum Level (default L) {
        L = 1,
        M = 2,
        Q = 3,
        H = 4,
    }
}

id_enum! {
    /// Glyph drawn for each dark module.
    pub enum DotStyle (default Square) {
        Square = 1,
        Rounded = 2,
        Circle = 3,
        Heart = 4,
        Star = 5,
        Diamond = 6,
        Hexagon = 7,
        Triangle = 8,
    }
}

id_enum! {
    pub enum OuterBorder (default NoBorder) {
        NoBorder = 1,
        Thin = 2,
        Thick = 3,
        Dashed = 4,
        Dotted = 5,
        Double = 6,
        Shadow = 7,
        Glow = 8,
    }
}

impl Level {
    pub const fn ec_level(self) -> ECLevel {
        match self {
            Self::L | Self::Unknown(_) => ECLevel::L,
            Self::M => ECLevel::M,
            Self::Q => ECLevel::Q,
            Self::H => ECLevel::H,
        }
    }
}

impl From<ECLevel> for Level {
    fn from(ecl: ECLevel) -> Self {
        match ecl {
            ECLevel::L => Self::L,
            ECLevel::M => Self::M,
            ECLevel::Q => Self::Q,
            ECLevel::H => Self::H,
        }
    }
}
