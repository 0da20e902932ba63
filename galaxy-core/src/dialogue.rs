//! Story dialogue: the cast, dialogue lines, and the dialogue player.
//!
//! The player walks a queue of lines one at a time. It is the only thing that
//! enters or leaves `GameMode::StoryDialogue`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::speech::Speaker;
use crate::state::{GameMode, GameState};

/// Who is speaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterId {
    /// The commander and mentor.
    Nova,
    /// The ship's robot assistant.
    Sparky,
    /// The villain.
    Chaos,
}

impl CharacterId {
    pub fn profile(&self) -> &'static Character {
        match self {
            CharacterId::Nova => &NOVA,
            CharacterId::Sparky => &SPARKY,
            CharacterId::Chaos => &CHAOS,
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().name)
    }
}

/// Static presentation data for a cast member.
#[derive(Debug)]
pub struct Character {
    pub id: CharacterId,
    pub name: &'static str,
    pub role: &'static str,
}

static NOVA: Character = Character {
    id: CharacterId::Nova,
    name: "诺瓦指挥官",
    role: "星际舰队导师",
};

static SPARKY: Character = Character {
    id: CharacterId::Sparky,
    name: "斯帕克 (Sparky)",
    role: "AI 助手",
};

static CHAOS: Character = Character {
    id: CharacterId::Chaos,
    name: "混沌博士",
    role: "反派首领",
};

/// Speaker's expression for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Neutral,
    Happy,
    Angry,
    Worried,
}

/// One line of story dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    pub character_id: CharacterId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

impl DialogueLine {
    pub fn new(character_id: CharacterId, text: impl Into<String>) -> Self {
        Self {
            character_id,
            text: text.into(),
            mood: None,
        }
    }

    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }
}

/// Start playing a sequence of lines.
///
/// Does nothing for an empty sequence. Otherwise switches to story mode,
/// shows the first line and narrates it.
pub fn play(state: &mut GameState, lines: Vec<DialogueLine>, speaker: &mut dyn Speaker) {
    let mut lines = lines.into_iter();
    let Some(first) = lines.next() else {
        return;
    };

    speaker.speak(&first.text);
    state.mode = GameMode::StoryDialogue;
    state.current_dialogue = Some(first);
    state.dialogue_queue = lines.collect();
}

/// Move to the next line, or back to play when the queue is exhausted.
///
/// Ignored outside story mode.
pub fn advance(state: &mut GameState, speaker: &mut dyn Speaker) {
    if state.mode != GameMode::StoryDialogue {
        return;
    }

    match state.dialogue_queue.pop_front() {
        Some(next) => {
            speaker.speak(&next.text);
            state.current_dialogue = Some(next);
        }
        None => {
            state.current_dialogue = None;
            state.mode = GameMode::Playing;
        }
    }
}
