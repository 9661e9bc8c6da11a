use std::str::FromStr;
use thiserror::Error;

pub const MENU: &str = "(B)uy something at the shop.\n\
(S)ell something at the shop.\n\
(M)ove on to a different town.\n\
(L)ook for trouble!\n\
(D)ig for gold.\n\
(H)unt for treasure.\n\
Give up the hunt and e(X)it.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Buy,
    Sell,
    Move,
    Look,
    Dig,
    Hunt,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid menu option `{0}`")]
pub struct ParseActionError(pub String);

impl FromStr for MenuChoice {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" => Ok(Self::Buy),
            "s" => Ok(Self::Sell),
            "m" => Ok(Self::Move),
            "l" => Ok(Self::Look),
            "d" => Ok(Self::Dig),
            "h" => Ok(Self::Hunt),
            "x" => Ok(Self::Exit),
            other => Err(ParseActionError(other.to_string())),
        }
    }
}
