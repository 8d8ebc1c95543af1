use serde::ser::{Serialize, SerializeStruct, Serializer};

pub const DISCLAIMER: &str = "⚠️ Disclaimer: This advice is generated by AI and should not be considered as professional financial advice. Always consult with a qualified financial advisor before making investment decisions.";

const POSITIVE_ADVICE: &str = "📈 The article shows positive sentiment. Consider this as a favorable indicator, but always conduct thorough research before making investment decisions.";
const NEGATIVE_ADVICE: &str = "📉 The article shows negative sentiment. Exercise caution and consider diversifying your portfolio. Consult with a financial advisor for personalized guidance.";
const NEUTRAL_ADVICE: &str = "➡️ The article shows neutral sentiment. Monitor the situation closely and gather more information before making any decisions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    Positive,
    Negative,
    Neutral,
}

impl Advice {
    pub fn kind(&self) -> &'static str {
        match self {
            Advice::Positive => "positive",
            Advice::Negative => "negative",
            Advice::Neutral => "neutral",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Advice::Positive => POSITIVE_ADVICE,
            Advice::Negative => NEGATIVE_ADVICE,
            Advice::Neutral => NEUTRAL_ADVICE,
        }
    }
}

impl Serialize for Advice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Advice", 2)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", self.message())?;
        state.end()
    }
}

/// Maps a sentiment label to advice.
///
/// Labels containing `POSITIVE` or `NEGATIVE` (any case) pick the matching
/// advice, positive first. `"2"` and `"0"` are accepted as numeric class
/// aliases. Everything else is neutral. The score does not change the result.
pub fn generate_advice(label: &str, _score: f64) -> Advice {
    let upper = label.to_uppercase();
    if upper.contains("POSITIVE") || label == "2" {
        Advice::Positive
    } else if upper.contains("NEGATIVE") || label == "0" {
        Advice::Negative
    } else {
        Advice::Neutral
    }
}
