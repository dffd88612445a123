use std::{fmt, str::FromStr};

/// Education boards accepted by the results site, keyed by their `<option>` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    Barisal,
    Chittagong,
    Comilla,
    Dhaka,
    Dinajpur,
    Jessore,
    Mymensingh,
    Rajshahi,
    Sylhet,
    Madrasah,
    Tec,
    Dibs,
}

pub const ALL_BOARDS: [Board; 12] = [
    Board::Barisal,
    Board::Chittagong,
    Board::Comilla,
    Board::Dhaka,
    Board::Dinajpur,
    Board::Jessore,
    Board::Mymensingh,
    Board::Rajshahi,
    Board::Sylhet,
    Board::Madrasah,
    Board::Tec,
    Board::Dibs,
];

impl Board {
    pub fn as_str(&self) -> &'static str {
        match self {
            Board::Barisal => "barisal",
            Board::Chittagong => "chittagong",
            Board::Comilla => "comilla",
            Board::Dhaka => "dhaka",
            Board::Dinajpur => "dinajpur",
            Board::Jessore => "jessore",
            Board::Mymensingh => "mymensingh",
            Board::Rajshahi => "rajshahi",
            Board::Sylhet => "sylhet",
            Board::Madrasah => "madrasah",
            Board::Tec => "tec",
            Board::Dibs => "dibs",
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownBoard(pub String);

impl FromStr for Board {
    type Err = UnknownBoard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        ALL_BOARDS
            .into_iter()
            .find(|board| board.as_str() == lowered)
            .ok_or(UnknownBoard(s.to_string()))
    }
}
