use serde::{Deserialize, Serialize};

/// The symbols printed on the cards. Every deck holds exactly two of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardName {
    Death,
    Temperance,
    HighPriestess,
    Hermit,
    HangedMan,
    Lovers,
    Justice,
    Fool,
}

impl CardName {
    pub const ALL: [CardName; 8] = [
        CardName::Death,
        CardName::Temperance,
        CardName::HighPriestess,
        CardName::Hermit,
        CardName::HangedMan,
        CardName::Lovers,
        CardName::Justice,
        CardName::Fool,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardName::Death => "DEATH",
            CardName::Temperance => "TEMPERANCE",
            CardName::HighPriestess => "HIGH_PRIESTESS",
            CardName::Hermit => "HERMIT",
            CardName::HangedMan => "HANGED_MAN",
            CardName::Lovers => "LOVERS",
            CardName::Justice => "JUSTICE",
            CardName::Fool => "FOOL",
        }
    }
}

/// Which way up a card is lying on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardFace {
    /// Face down
    Hidden,
    /// Face up as part of the current turn, not yet paired
    Revealed,
    /// Face up for the rest of the game
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: CardName,
    pub face: CardFace,
}

impl Card {
    pub fn new(name: CardName) -> Self {
        Self {
            name,
            face: CardFace::Hidden,
        }
    }

    /// A card counts as flipped whenever its face is showing
    pub fn is_flipped(&self) -> bool {
        self.face != CardFace::Hidden
    }

    pub fn reveal(&mut self) {
        self.face = CardFace::Revealed;
    }

    pub fn hide(&mut self) {
        self.face = CardFace::Hidden;
    }

    pub fn mark_matched(&mut self) {
        self.face = CardFace::Matched;
    }
}

pub type Deck = Vec<Card>;

/// Build a deck holding two face-down cards of every symbol
pub fn build_deck() -> Deck {
    let mut deck = Vec::with_capacity(CardName::ALL.len() * 2);
    for name in CardName::ALL {
        deck.push(Card::new(name));
        deck.push(Card::new(name));
    }

    tracing::debug!("Built card deck with {} cards", deck.len());
    deck
}
