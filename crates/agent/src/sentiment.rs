use serde::{Deserialize, Serialize};

const POSITIVE_WORDS: &[&str] =
    &["good", "great", "excellent", "amazing", "love", "like", "happy", "pleased"];
const NEGATIVE_WORDS: &[&str] =
    &["bad", "terrible", "awful", "hate", "dislike", "unhappy", "angry", "disappointed"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub sentiment: Sentiment,
    pub positive_score: u32,
    pub negative_score: u32,
}

/// Scores text against the two fixed lexicons: one count per lexicon word
/// contained in the lower-cased input. Strictly more positive hits win,
/// strictly more negative hits lose, everything else is neutral.
pub fn score(text: &str) -> SentimentScore {
    let normalized = text.to_lowercase();

    let positive_score = POSITIVE_WORDS.iter().filter(|word| normalized.contains(*word)).count();
    let negative_score = NEGATIVE_WORDS.iter().filter(|word| normalized.contains(*word)).count();

    let sentiment = if positive_score > negative_score {
        Sentiment::Positive
    } else if negative_score > positive_score {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    SentimentScore {
        sentiment,
        positive_score: positive_score as u32,
        negative_score: negative_score as u32,
    }
}
