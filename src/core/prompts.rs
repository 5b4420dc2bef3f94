//! Prompt templates for the three generation stages.

use crate::domain::OutputFormat;

/// Stage 1: a short topic title from the user's description
pub fn topic_title_prompt(topic_prompt: &str) -> String {
    format!(
        "Generate a concise topic title (2-4 words) based on the following description: {}",
        topic_prompt.trim()
    )
}

/// Stage 2: a list of document titles, one per line
pub fn document_titles_prompt(topic_title: &str, count: usize) -> String {
    format!(
        r#"Based on the topic "{topic_title}", generate a list of {count} document titles that would be valuable for an LLM to reference in a Retrieval-Augmented Generation (RAG) system. These titles should cover various aspects and subtopics related to the main topic.
Provide only the titles, one per line, without numbering or additional explanation."#
    )
}

/// Stage 3: the full document body for one title
pub fn document_content_prompt(title: &str, format: OutputFormat) -> String {
    let shape = match format {
        OutputFormat::Text => {
            "The document should be well-structured, informative, and approximately 500-1000 words in length."
        }
        OutputFormat::Yaml => {
            "Format the document as valid YAML with the top-level keys `title`, `summary`, `key_concepts` (a list), `sections` (a list of mappings with `heading` and `content`), and `examples` (a list). Aim for approximately 500-1000 words of content. Output only the YAML, without any surrounding explanation."
        }
    };

    format!(
        r#"Create a comprehensive document on the topic: "{title}"
This document will be used as a reference for an LLM in a Retrieval-Augmented Generation (RAG) system.
Include relevant information, key concepts, examples, and any other pertinent details that would be valuable for an AI to understand and utilize this topic.
{shape}"#
    )
}
