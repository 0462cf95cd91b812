//! Image textures are filtered through an image pyramid. The pyramid
//! itself is built by the texture cache owner; this module holds the
//! settings that select how texels are fetched.

// std
use std::fmt;
use std::str::FromStr;

// see mipmap.h

/// How lookups outside of [0, 1] are handled. The declaration order
/// defines the ordering used by texture cache keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImageWrap {
    Repeat,
    Black,
    Clamp,
}

impl Default for ImageWrap {
    fn default() -> Self {
        ImageWrap::Repeat
    }
}

impl fmt::Display for ImageWrap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name: &str = match self {
            ImageWrap::Repeat => "repeat",
            ImageWrap::Black => "black",
            ImageWrap::Clamp => "clamp",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ImageWrap {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repeat" => Ok(ImageWrap::Repeat),
            "black" => Ok(ImageWrap::Black),
            "clamp" => Ok(ImageWrap::Clamp),
            _ => Err(format!("unknown wrap mode \"{}\"", s)),
        }
    }
}
