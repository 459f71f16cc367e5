// Prompt templates and response schemas for every tool endpoint.
// Templates carry an `{input}` placeholder that is replaced before sending.
// The chat prompt is assembled directly from its pieces.

use serde_json::{json, Value};

use crate::llm_client::prompts::{COUNSELOR_PERSONA, JSON_ONLY_INSTRUCTION};

/// Levels of `children` the roadmap schema spells out. The provider's schema
/// dialect has no references, so the nesting is unrolled.
pub const ROADMAP_SCHEMA_DEPTH: usize = 4;

pub const CAREER_RECOMMENDATIONS_TEMPLATE: &str = "Based on the following knowledge and interests: {input} , \
    recommend suitable career options and explain why each career is a good fit.";

pub const CAREER_GUIDANCE_TEMPLATE: &str = "For someone who wants to become: {input} , \
    list the relevant entrance or certification exams, scholarships they can apply for, \
    prerequisites they must meet, and study programs that lead to this career. \
    Give each item a short description.";

pub const RESOURCE_TEMPLATE: &str = "List online communities and study materials for preparing for or \
    learning: {input} . For each group give its name, a description, a link and an approximate member count. \
    For each material give its name, a link, a description and its type (book, course, video, website, practice).";

pub const ROADMAP_TEMPLATE: &str = "Create a step-by-step roadmap for: {input} . \
    Represent it as a tree whose root names the goal and whose children break it into \
    ordered stages, topics and sub-topics.";

pub fn fill(template: &str, input: &str) -> String {
    format!("{} {}", template.replace("{input}", input), JSON_ONLY_INSTRUCTION)
}

pub fn chat_prompt(history: &str, message: &str) -> String {
    let history = if history.trim().is_empty() {
        "(no previous messages)"
    } else {
        history
    };
    // History and message are user text; they are never rescanned for placeholders.
    format!("{COUNSELOR_PERSONA}\n\nConversation so far:\n{history}\n\nuser: {message}\nai(you):")
}

fn titled_items(title_field: &str) -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                title_field: {"type": "STRING"},
                "description": {"type": "STRING"}
            },
            "required": [title_field, "description"]
        }
    })
}

pub fn career_recommendations_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "careerRecommendations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "careerTitle": {"type": "STRING"},
                        "description": {"type": "STRING"},
                        "whyRecommended": {"type": "STRING"}
                    },
                    "required": ["careerTitle", "description", "whyRecommended"]
                }
            }
        },
        "required": ["careerRecommendations"]
    })
}

pub fn career_guidance_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "relevantExams": titled_items("examTitle"),
            "scholarships": titled_items("scholarshipTitle"),
            "prerequisites": titled_items("prerequisiteTitle"),
            "programs": titled_items("programTitle")
        },
        "required": ["relevantExams", "scholarships", "prerequisites", "programs"]
    })
}

pub fn resource_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "groups": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING"},
                        "description": {"type": "STRING"},
                        "link": {"type": "STRING"},
                        "members": {"type": "INTEGER"}
                    },
                    "required": ["name", "description", "link", "members"]
                }
            },
            "materials": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING"},
                        "link": {"type": "STRING"},
                        "description": {"type": "STRING"},
                        "type": {"type": "STRING"}
                    },
                    "required": ["name", "link", "description", "type"]
                }
            }
        },
        "required": ["groups", "materials"]
    })
}

/// Builds the `{name, children[]}` schema from the leaves up.
pub fn roadmap_schema(depth: usize) -> Value {
    let mut node = json!({
        "type": "OBJECT",
        "properties": {"name": {"type": "STRING"}},
        "required": ["name"]
    });
    for _ in 0..depth {
        node = json!({
            "type": "OBJECT",
            "properties": {
                "name": {"type": "STRING"},
                "children": {"type": "ARRAY", "items": node}
            },
            "required": ["name"]
        });
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_embeds_input_verbatim() {
        let prompt = fill(CAREER_RECOMMENDATIONS_TEMPLATE, "machine learning");
        assert!(prompt.starts_with(
            "Based on the following knowledge and interests: machine learning , recommend"
        ));
        assert!(prompt.contains("valid JSON only"));
    }

    #[test]
    fn test_chat_prompt_marks_empty_history() {
        let prompt = chat_prompt("  ", "Should I study law?");
        assert!(prompt.contains("(no previous messages)"));
        assert!(prompt.ends_with("user: Should I study law?\nai(you):"));
    }

    #[test]
    fn test_chat_prompt_keeps_placeholder_text_in_history() {
        let prompt = chat_prompt("user: what does {message} mean?", "thanks");
        assert!(prompt.contains("user: what does {message} mean?\n"));
        assert!(prompt.ends_with("user: thanks\nai(you):"));
        assert!(prompt.starts_with(COUNSELOR_PERSONA));
    }

    #[test]
    fn test_roadmap_schema_nests_to_requested_depth() {
        let schema = roadmap_schema(2);
        let level1 = &schema["properties"]["children"]["items"];
        let level2 = &level1["properties"]["children"]["items"];
        assert_eq!(level2["properties"]["name"]["type"], "STRING");
        assert!(level2["properties"].get("children").is_none());
    }

    #[test]
    fn test_guidance_schema_lists_all_four_groups() {
        let schema = career_guidance_schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 4);
        assert_eq!(
            schema["properties"]["programs"]["items"]["required"][0],
            "programTitle"
        );
    }
}
