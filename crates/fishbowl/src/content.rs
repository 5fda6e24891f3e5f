//! Static page content.

/// Phrase revealed by the slot-machine intro.
pub const INTRO_PHRASE: &str = "BIG BOI FISH";

/// Line typed out after the slot letters settle.
pub const TYPING_LINE: &str = "blub hup :)";

/// Hero title on the page proper.
pub const HERO_TITLE: &str = "BIG BOI FISH";

/// Scramble word at rest.
pub const WORD_DEFAULT: &str = "swim_";
/// Scramble word while hovered.
pub const WORD_HOVER: &str = "U+1F421";

/// Fallback ticker messages when the config supplies none.
pub const TICKER_MESSAGES: &[&str] = &[
    "the fish are watching",
    "hydration is mandatory",
    "blub blub blub",
    "do not tap the glass",
    "somewhere it is raining",
];

/// A downloadable prompt file shown in the list.
pub struct FileEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub size: &'static str,
}

pub const FILES: &[FileEntry] = &[
    FileEntry {
        name: "cogni_mentor.json",
        description: "Divine Study Mentor",
        size: "4.1 KB",
    },
    FileEntry {
        name: "exam_mentor.json",
        description: "End-Sem Tutor Assistant",
        size: "4.3 KB",
    },
    FileEntry {
        name: "swim_.pdf",
        description: "swim_.pdf",
        size: "847 KB",
    },
];

/// Footer credit line.
pub const FOOTER_LEAD: &str = "rendered to reality by ";
pub const FOOTER_AUTHOR: &str = "divine froggie";
pub const FOOTER_FACE: &str = " ಠ╭╮ಠ";
