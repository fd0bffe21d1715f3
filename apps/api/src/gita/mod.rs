//! Gita Ashram features: Decision Compass, Mind Coach and Shloka-to-Life.
//! The verse corpus, theme extraction and retrieval are pure and synchronous;
//! only the feature modules talk to the model, and only through llm_client.

pub mod compass;
pub mod corpus;
pub mod handlers;
pub mod mind_coach;
pub mod prompts;
pub mod retriever;
pub mod shloka;
pub mod themes;
