// Tool endpoints: career suggestions, career guidance, resource finder,
// roadmap maker and the counselling chat.
// All model calls go through llm_client.

pub mod handlers;
pub mod prompts;
