use crate::random::RandomSource;

/// Buttons keep this far (in percent of the screen) from every edge.
pub const EDGE_MARGIN_PCT: f64 = 10.0;
pub const MIN_DECOYS: u32 = 8;
pub const MAX_DECOYS: u32 = 12;
pub const TARGET_LABEL: &str = "Leave Call";

/// Center of a button, in percent of the screen width and height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        let range = EDGE_MARGIN_PCT..=(100.0 - EDGE_MARGIN_PCT);
        range.contains(&self.x) && range.contains(&self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ButtonColor {
    Red,
    Blue,
    Green,
    Amber,
    Purple,
    Pink,
    Cyan,
    Orange,
}

impl ButtonColor {
    pub const ALL: [ButtonColor; 8] = [
        ButtonColor::Red,
        ButtonColor::Blue,
        ButtonColor::Green,
        ButtonColor::Amber,
        ButtonColor::Purple,
        ButtonColor::Pink,
        ButtonColor::Cyan,
        ButtonColor::Orange,
    ];

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ButtonColor::Red => (0xef, 0x44, 0x44),
            ButtonColor::Blue => (0x3b, 0x82, 0xf6),
            ButtonColor::Green => (0x10, 0xb9, 0x81),
            ButtonColor::Amber => (0xf5, 0x9e, 0x0b),
            ButtonColor::Purple => (0x8b, 0x5c, 0xf6),
            ButtonColor::Pink => (0xec, 0x48, 0x99),
            ButtonColor::Cyan => (0x06, 0xb6, 0xd4),
            ButtonColor::Orange => (0xf9, 0x73, 0x16),
        }
    }
}

/// Labels a decoy can wear. Decoys may also claim to be "Leave Call".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum DecoyLabel {
    #[strum(serialize = "Leave Call")]
    LeaveCall,
    #[strum(serialize = "End Call")]
    EndCall,
    #[strum(serialize = "Hang Up")]
    HangUp,
    #[strum(serialize = "Disconnect")]
    Disconnect,
    #[strum(serialize = "Exit Call")]
    ExitCall,
}

impl DecoyLabel {
    pub const ALL: [DecoyLabel; 5] = [
        DecoyLabel::LeaveCall,
        DecoyLabel::EndCall,
        DecoyLabel::HangUp,
        DecoyLabel::Disconnect,
        DecoyLabel::ExitCall,
    ];
}

/// The one button that actually counts
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub position: Position,
    pub color: ButtonColor,
}

impl Target {
    pub fn roll(rng: &mut dyn RandomSource) -> Self {
        Self {
            position: random_position(rng),
            color: roll_color(rng),
        }
    }

    pub fn label(&self) -> &'static str {
        TARGET_LABEL
    }

    pub fn reroll(&mut self, rng: &mut dyn RandomSource) {
        *self = Self::roll(rng);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoy {
    pub id: usize,
    pub position: Position,
    pub color: ButtonColor,
    pub label: DecoyLabel,
}

impl Decoy {
    pub fn roll(id: usize, rng: &mut dyn RandomSource) -> Self {
        Self {
            id,
            position: random_position(rng),
            color: roll_color(rng),
            label: roll_label(rng),
        }
    }

    /// New position, color and label; the id is kept
    pub fn reroll(&mut self, rng: &mut dyn RandomSource) {
        *self = Self::roll(self.id, rng);
    }
}

pub fn random_position(rng: &mut dyn RandomSource) -> Position {
    let hi = 100.0 - EDGE_MARGIN_PCT;
    let x = rng.uniform(EDGE_MARGIN_PCT, hi);
    let y = rng.uniform(EDGE_MARGIN_PCT, hi);
    Position::new(x, y)
}

pub fn roll_color(rng: &mut dyn RandomSource) -> ButtonColor {
    ButtonColor::ALL[rng.pick_index(ButtonColor::ALL.len())]
}

pub fn roll_label(rng: &mut dyn RandomSource) -> DecoyLabel {
    DecoyLabel::ALL[rng.pick_index(DecoyLabel::ALL.len())]
}

/// A fresh decoy set of random size in `MIN_DECOYS..=MAX_DECOYS`
pub fn roll_decoys(rng: &mut dyn RandomSource) -> Vec<Decoy> {
    let count = rng.range_inclusive(MIN_DECOYS, MAX_DECOYS) as usize;
    (0..count).map(|id| Decoy::roll(id, rng)).collect()
}
