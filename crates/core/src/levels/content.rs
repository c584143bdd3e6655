//! Static puzzle content for the four levels

/// A selectable artifact in the auction deduction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artifact {
    pub name: &'static str,
    pub correct: bool,
    /// Why the artifact is ruled out (empty for the stolen one)
    pub reason: &'static str,
}

/// One multiple-choice question on the cargo plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceQuestion {
    pub text: &'static str,
    pub options: [&'static str; 3],
    pub answer: &'static str,
}

impl ChoiceQuestion {
    pub fn option(&self, index: usize) -> Option<&'static str> {
        self.options.get(index).copied()
    }

    pub fn is_answer(&self, index: usize) -> bool {
        self.option(index) == Some(self.answer)
    }
}

/// A sentence with a single blank and its expected token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlankSentence {
    pub before: &'static str,
    pub cue: &'static str,
    pub after: &'static str,
    pub answer: &'static str,
}

pub const MENU_TITLE: &str = "UNCHARTED";
pub const MENU_SUBTITLE: &str = "The Lexicon Expedition";

pub const AUCTION_CLUES: [&str; 3] = [
    "Clue 1: The item stolen must be heavy.",
    "Clue 2: It can't be something protected by glass.",
    "Clue 3: It might be a weapon.",
];

pub const AUCTION_ARTIFACTS: [Artifact; 3] = [
    Artifact {
        name: "King's Crown",
        correct: false,
        reason: "The thief left fingerprints, so they weren't wearing gloves. The crown is behind glass.",
    },
    Artifact {
        name: "Rusty Cutlass",
        correct: true,
        reason: "",
    },
    Artifact {
        name: "Sapphire Eye",
        correct: false,
        reason: "The thief is strong. The gem is too light.",
    },
];

pub const AUCTION_HINT: &str = "Think about the clues! 'Must be heavy' means...";

pub const CRYPT_INSTRUCTION: &str = "Arrange the stones: Passive Voice";

pub const CRYPT_SCRAMBLED: [&str; 3] = ["was stolen", "in 1522", "The golden cross"];

pub const CRYPT_TARGET: [&str; 3] = ["The golden cross", "was stolen", "in 1522"];

pub const PLANE_QUESTIONS: [ChoiceQuestion; 3] = [
    ChoiceQuestion {
        text: "The plane is taking ___!",
        options: ["OFF", "UP", "OUT"],
        answer: "OFF",
    },
    ChoiceQuestion {
        text: "We need to ___ out the fire!",
        options: ["PUT", "GET", "TAKE"],
        answer: "PUT",
    },
    ChoiceQuestion {
        text: "Look ___! A falling crate!",
        options: ["IN", "OUT", "FOR"],
        answer: "OUT",
    },
];

pub const CANNON_SENTENCE: BlankSentence = BlankSentence {
    before: "If I",
    cue: "(have)",
    after: "the map, we would be safe!",
    answer: "had",
};
