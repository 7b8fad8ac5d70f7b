//! Starter topics and questions used to seed an empty database.

use crate::levels::{Difficulty, OptionLetter};

/// A topic to insert when seeding.
#[derive(Debug, Clone, Copy)]
pub struct SeedTopic {
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
}

/// A question to insert when seeding, attached to a topic by title.
#[derive(Debug, Clone, Copy)]
pub struct SeedQuestion {
    pub topic_title: &'static str,
    pub question_text: &'static str,
    pub options: [&'static str; 4],
    pub correct_option: OptionLetter,
    pub difficulty: Difficulty,
}

pub const SEED_TOPICS: &[SeedTopic] = &[
    SeedTopic {
        title: "JavaScript Basics",
        description: "Learn fundamental JavaScript concepts",
        difficulty: Difficulty::Easy,
    },
    SeedTopic {
        title: "React Fundamentals",
        description: "Introduction to React framework",
        difficulty: Difficulty::Medium,
    },
    SeedTopic {
        title: "Node.js Advanced",
        description: "Advanced server-side development",
        difficulty: Difficulty::Hard,
    },
];

pub const SEED_QUESTIONS: &[SeedQuestion] = &[
    SeedQuestion {
        topic_title: "JavaScript Basics",
        question_text: "What is the correct way to declare a variable in JavaScript?",
        options: ["var x = 5;", "variable x = 5;", "v x = 5;", "declare x = 5;"],
        correct_option: OptionLetter::A,
        difficulty: Difficulty::Easy,
    },
    SeedQuestion {
        topic_title: "JavaScript Basics",
        question_text: "Which operator checks both value and type equality?",
        options: ["==", "=", "===", "!="],
        correct_option: OptionLetter::C,
        difficulty: Difficulty::Easy,
    },
    SeedQuestion {
        topic_title: "React Fundamentals",
        question_text: "Which hook adds local state to a function component?",
        options: ["useEffect", "useState", "useRef", "useMemo"],
        correct_option: OptionLetter::B,
        difficulty: Difficulty::Medium,
    },
    SeedQuestion {
        topic_title: "Node.js Advanced",
        question_text: "Which module runs work on separate threads within one Node.js process?",
        options: ["cluster", "child_process", "http", "worker_threads"],
        correct_option: OptionLetter::D,
        difficulty: Difficulty::Hard,
    },
];
