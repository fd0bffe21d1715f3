use serde::{Deserialize, Serialize};

use crate::gita::prompts::{mind_coach_system_prompt, mind_coach_user_prompt};
use crate::llm_client::{null_as_default, parse_json, ChatOptions, LanguageModel, LlmError};

const MIND_COACH_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.4,
    max_tokens: 1400,
    json_object: true,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MindCoachPayload {
    pub emotion: Option<String>,
    pub context: Option<String>,
}

/// Coaching content. Deserializing it from model output is the sanitisation
/// step: anything missing or null becomes an empty string or list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MindCoachContent {
    #[serde(deserialize_with = "null_as_default")]
    pub emotion_label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub short_summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gita_lens: GitaLens,
    #[serde(deserialize_with = "null_as_default")]
    pub reframe_bullets: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub verses: Vec<CoachVerse>,
    #[serde(deserialize_with = "null_as_default")]
    pub reset_practice: ResetPractice,
    #[serde(rename = "experiment24h", deserialize_with = "null_as_default")]
    pub experiment_24h: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitaLens {
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachVerse {
    #[serde(rename = "ref", deserialize_with = "null_as_default")]
    pub reference: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sanskrit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub translation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetPractice {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub steps: Vec<String>,
}

/// One chat call. The emotion is expected lowercased and non-empty.
pub async fn coach(
    llm: &dyn LanguageModel,
    emotion: &str,
    context: &str,
    language: &str,
) -> Result<MindCoachContent, LlmError> {
    let system = mind_coach_system_prompt();
    let user = mind_coach_user_prompt(emotion, context, language);
    let text = llm.chat(&system, &user, MIND_COACH_OPTIONS).await?;
    parse_json(&text)
}

/// Static coaching built around the emotion label; served without a model
/// and whenever the model call fails.
pub fn fallback_content(emotion: &str, context: &str) -> MindCoachContent {
    let label = capitalise(emotion);
    let context_note = if context.is_empty() {
        ""
    } else {
        " You’ve also shared a bit about your situation, which already shows sincerity."
    };

    MindCoachContent {
        short_summary: format!(
            "You are feeling {} and trying to make sense of it.{context_note}",
            label.to_lowercase()
        ),
        emotion_label: label,
        gita_lens: GitaLens {
            summary: "The Gita treats strong emotions as moments to pause, see clearly, and \
                      realign with dharma, not as proof that you are failing."
                .to_string(),
            points: vec![
                "Big emotions often arise when there is a clash between expectations, desires, and your deeper sense of right action (dharma).".to_string(),
                "Instead of seeing the emotion as an enemy, you can see it as a signal that some inner realignment is needed.".to_string(),
                "Krishna keeps inviting Arjuna to look at his state of mind, not with shame, but with honesty and courage.".to_string(),
            ],
        },
        reframe_bullets: vec![
            "Instead of ‘something is wrong with me’, you might try ‘something important in me is asking for attention and clarity.’".to_string(),
            "Rather than fighting the emotion, you can sit with it and gently ask, ‘What is this trying to tell me about what really matters?’".to_string(),
        ],
        verses: vec![CoachVerse {
            reference: "Bhagavad Gita 2.14".to_string(),
            sanskrit: String::new(),
            translation: "O Arjuna, the appearances of happiness and distress, and their \
                          disappearance in due course, are like the appearance and disappearance \
                          of winter and summer seasons."
                .to_string(),
            note: "This verse reminds you that emotions rise and fall. You are invited to notice \
                   them, learn from them, and not let them define your deepest self."
                .to_string(),
        }],
        reset_practice: ResetPractice {
            title: "2-minute Gita pause with breath".to_string(),
            steps: vec![
                "Sit comfortably and place one hand lightly on your chest or heart area.".to_string(),
                "Take 5 slow breaths, letting each exhale be just a little longer than the inhale.".to_string(),
                "On each exhale, silently say: ‘For a moment, I allow this feeling to be here.’".to_string(),
                "On the last breath, silently say: ‘May I see my next step with more clarity and kindness.’".to_string(),
            ],
        },
        experiment_24h: "In the next 24 hours, notice one moment when this emotion rises again. \
                         Instead of reacting immediately, take three slow breaths, remember one \
                         line from the Gita that comforts you, and then choose a slightly kinder \
                         response."
            .to_string(),
    }
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}
