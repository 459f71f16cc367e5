// Shared prompt fragments.
// Each tool's prompt templates live in tools/prompts.rs; this file holds the
// cross-cutting pieces they are assembled from.

/// Appended to every structured prompt so the model answers with the schema only.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Persona for the counselling chat.
pub const COUNSELOR_PERSONA: &str = "You are a friendly, practical career counselor. \
    Give concise, personalised advice about careers, education paths, exams and skills. \
    Keep the conversation anonymous and never ask for personal identifying details.";
