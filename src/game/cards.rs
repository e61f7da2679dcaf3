//! Static card catalog.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Card {
    DoubleJeopardy,
    Blackout,
    Shield,
    Premonition,
    Relocate,
    Skip,
    MineShift,
    Decoy,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category { Attack, Support, Chaos }

/// What a targeted card needs the player to click.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Target { None, AnyCell, OwnRevealedCell }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardDef {
    pub card: Card,
    pub name: &'static str,
    pub category: Category,
    pub target: Target,
    /// Immediate cards that also finish the player's turn.
    pub ends_turn: bool,
}

impl CardDef {
    pub fn is_immediate(&self) -> bool { self.target == Target::None }
}

const CATALOG: [CardDef; 8] = [
    CardDef { card: Card::DoubleJeopardy, name: "Double Jeopardy", category: Category::Attack, target: Target::None, ends_turn: true },
    CardDef { card: Card::Blackout, name: "Blackout", category: Category::Attack, target: Target::None, ends_turn: true },
    CardDef { card: Card::Shield, name: "Shield", category: Category::Support, target: Target::None, ends_turn: false },
    CardDef { card: Card::Premonition, name: "Premonition", category: Category::Support, target: Target::AnyCell, ends_turn: false },
    CardDef { card: Card::Relocate, name: "Relocate", category: Category::Support, target: Target::OwnRevealedCell, ends_turn: false },
    CardDef { card: Card::Skip, name: "Skip", category: Category::Support, target: Target::None, ends_turn: true },
    CardDef { card: Card::MineShift, name: "Mine Shift", category: Category::Chaos, target: Target::None, ends_turn: false },
    CardDef { card: Card::Decoy, name: "Decoy", category: Category::Chaos, target: Target::AnyCell, ends_turn: false },
];

impl Card {
    pub const ALL: [Card; 8] = [
        Card::DoubleJeopardy,
        Card::Blackout,
        Card::Shield,
        Card::Premonition,
        Card::Relocate,
        Card::Skip,
        Card::MineShift,
        Card::Decoy,
    ];

    pub fn def(self) -> &'static CardDef {
        // CATALOG is declared in the same order as ALL
        &CATALOG[self as usize]
    }

    pub fn name(self) -> &'static str { self.def().name }

    /// Uniform draw over the whole catalog.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Card {
        Card::ALL[rng.gen_range(0..Card::ALL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lines_up_with_cards() {
        for card in Card::ALL {
            assert_eq!(card.def().card, card);
        }
    }

    #[test]
    fn only_immediate_cards_end_the_turn() {
        let enders: Vec<Card> = Card::ALL.into_iter().filter(|c| c.def().ends_turn).collect();
        assert_eq!(enders, vec![Card::DoubleJeopardy, Card::Blackout, Card::Skip]);
        assert!(enders.iter().all(|c| c.def().is_immediate()));
    }

    #[test]
    fn targeted_cards() {
        assert_eq!(Card::Premonition.def().target, Target::AnyCell);
        assert_eq!(Card::Decoy.def().target, Target::AnyCell);
        assert_eq!(Card::Relocate.def().target, Target::OwnRevealedCell);
        assert!(Card::MineShift.def().is_immediate());
    }

    #[test]
    fn card_ids_on_the_wire() {
        assert_eq!(serde_json::to_string(&Card::MineShift).unwrap(), "\"mine_shift\"");
        let card: Card = serde_json::from_str("\"double_jeopardy\"").unwrap();
        assert_eq!(card, Card::DoubleJeopardy);
    }
}
