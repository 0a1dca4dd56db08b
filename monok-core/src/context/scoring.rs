//! Message importance scoring for pruning decisions

use once_cell::sync::Lazy;
use regex::Regex;

use crate::message::Message;

/// Characters of content per length point
const LENGTH_UNIT: f64 = 500.0;
/// Upper bound of the length term
const LENGTH_CAP: f64 = 3.0;
/// Weight of the recency term (position within the older pool)
const RECENCY_WEIGHT: f64 = 4.0;

struct Bonus {
    pattern: Lazy<Regex>,
    weight: f64,
}

macro_rules! bonus {
    ($pattern:expr, $weight:expr) => {
        Bonus {
            pattern: Lazy::new(|| Regex::new($pattern).expect("static pattern")),
            weight: $weight,
        }
    };
}

static PERSONAL: Bonus = bonus!(
    r"(?i)\b(I am|my name|I prefer|I always|I never|I like|I hate|I work|my job)\b",
    5.0
);
static COMMITMENT: Bonus = bonus!(
    r"(?i)\b(will|going to|remind me|todo|don't forget|remember to|make sure|promise)\b",
    4.0
);
static FILE_REFERENCE: Bonus = bonus!(r"(?i)\.(js|ts|py|md|json|css|html|txt)(\s|$)", 1.5);
static DECISION: Bonus = bonus!(
    r"(?i)\b(decided|prefer|better|chose|want|need|should|must)\b",
    2.0
);
static DATE: Bonus = bonus!(r"\b[0-9]{4}[-/][0-9]{1,2}[-/][0-9]{1,2}\b", 2.0);
static EMOTION: Bonus = bonus!(
    r"(?i)\b(feel|feeling|happy|sad|frustrated|excited|worried|concerned)\b",
    1.5
);
static TROUBLE: Bonus = bonus!(
    r"(?i)\b(error|bug|issue|problem|broken|fix|crash|fail)\b",
    2.0
);

const CODE_FENCE_BONUS: f64 = 2.0;
const QUESTION_BONUS: f64 = 1.0;

/// Score how much a message is worth keeping when the window is pruned.
///
/// `index` and `total_messages` locate the message inside the pool of older
/// messages being ranked; later messages earn up to 4 extra points. The result
/// is deterministic and never negative.
pub fn score_message_importance(message: &Message, index: usize, total_messages: usize) -> f64 {
    let content = message.content.flatten();
    let mut score = (content.chars().count() as f64 / LENGTH_UNIT).min(LENGTH_CAP);

    for bonus in [&PERSONAL, &COMMITMENT, &FILE_REFERENCE, &DECISION, &DATE, &EMOTION, &TROUBLE] {
        if bonus.pattern.is_match(&content) {
            score += bonus.weight;
        }
    }

    if content.contains("```") {
        score += CODE_FENCE_BONUS;
    }
    if content.contains('?') {
        score += QUESTION_BONUS;
    }

    if total_messages > 0 {
        score += (index as f64 / total_messages as f64) * RECENCY_WEIGHT;
    }

    score
}
