//! Turns tool payloads into something a terminal can show: titled sections of
//! cards, an indented tree, or an empty-state line.

pub mod chat;
pub mod tree;

use std::fmt;

use crate::models::career::{CareerGuidance, CareerRecommendations};
use crate::models::resource::ResourceBundle;
use crate::models::roadmap::RoadmapNode;

pub use tree::TreeLine;

pub const NO_SUGGESTIONS: &str = "No career suggestions found.";
pub const NO_GUIDANCE: &str = "No guidance found for the provided career.";
pub const NO_RESOURCES: &str = "No resources found for the provided input.";

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub link: Option<String>,
    pub lines: Vec<String>,
}

impl Card {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            link: None,
            lines: Vec::new(),
        }
    }

    fn link(mut self, link: &str) -> Self {
        if !link.trim().is_empty() {
            self.link = Some(link.to_string());
        }
        self
    }

    fn line(mut self, line: impl Into<String>) -> Self {
        let line = line.into();
        if !line.trim().is_empty() {
            self.lines.push(line);
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// `None` for single-list payloads that need no heading.
    pub heading: Option<&'static str>,
    pub cards: Vec<Card>,
}

/// What a panel shows for a successful result.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Sections(Vec<Section>),
    Tree(Vec<TreeLine>),
    Empty(&'static str),
}

impl View {
    /// Every card across all sections, in display order.
    pub fn cards(&self) -> Vec<&Card> {
        match self {
            View::Sections(sections) => sections.iter().flat_map(|s| s.cards.iter()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, View::Empty(_))
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Empty(message) => writeln!(f, "{message}"),
            View::Tree(lines) => {
                for line in lines {
                    writeln!(f, "{line}")?;
                }
                Ok(())
            }
            View::Sections(sections) => {
                for (i, section) in sections.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    if let Some(heading) = section.heading {
                        writeln!(f, "== {heading} ==")?;
                    }
                    for card in &section.cards {
                        writeln!(f, "* {}", card.title)?;
                        if let Some(link) = &card.link {
                            writeln!(f, "  <{link}>")?;
                        }
                        for line in &card.lines {
                            writeln!(f, "  {line}")?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

/// Payloads that know how to present themselves.
pub trait Render {
    fn render(&self) -> View;
}

impl Render for CareerRecommendations {
    fn render(&self) -> View {
        if self.career_recommendations.is_empty() {
            return View::Empty(NO_SUGGESTIONS);
        }
        let cards = self
            .career_recommendations
            .iter()
            .map(|r| {
                Card::new(&r.career_title)
                    .line(r.description.as_str())
                    .line(r.why_recommended.as_str())
            })
            .collect();
        View::Sections(vec![Section {
            heading: None,
            cards,
        }])
    }
}

impl Render for CareerGuidance {
    fn render(&self) -> View {
        if self.is_empty() {
            return View::Empty(NO_GUIDANCE);
        }
        let group = |heading, items: Vec<(&str, &str)>| Section {
            heading: Some(heading),
            cards: items
                .into_iter()
                .map(|(title, description)| Card::new(title).line(description))
                .collect(),
        };
        View::Sections(vec![
            group(
                "Relevant Exams",
                self.relevant_exams
                    .iter()
                    .map(|e| (e.exam_title.as_str(), e.description.as_str()))
                    .collect(),
            ),
            group(
                "Scholarships",
                self.scholarships
                    .iter()
                    .map(|s| (s.scholarship_title.as_str(), s.description.as_str()))
                    .collect(),
            ),
            group(
                "Prerequisites",
                self.prerequisites
                    .iter()
                    .map(|p| (p.prerequisite_title.as_str(), p.description.as_str()))
                    .collect(),
            ),
            group(
                "Programs",
                self.programs
                    .iter()
                    .map(|p| (p.program_title.as_str(), p.description.as_str()))
                    .collect(),
            ),
        ])
    }
}

impl Render for ResourceBundle {
    fn render(&self) -> View {
        if self.is_empty() {
            return View::Empty(NO_RESOURCES);
        }
        let groups = self
            .groups
            .iter()
            .map(|g| {
                Card::new(&g.name)
                    .link(&g.link)
                    .line(g.description.as_str())
                    .line(format!("Members: {}", format_count(g.members)))
            })
            .collect();
        let materials = self
            .materials
            .iter()
            .map(|m| {
                Card::new(&m.name)
                    .link(&m.link)
                    .line(m.description.as_str())
                    .line(format!("Type: {}", m.kind))
            })
            .collect();
        View::Sections(vec![
            Section {
                heading: Some("Groups"),
                cards: groups,
            },
            Section {
                heading: Some("Materials"),
                cards: materials,
            },
        ])
    }
}

impl Render for RoadmapNode {
    fn render(&self) -> View {
        View::Tree(tree::layout(self))
    }
}

/// Abbreviates member counts: 950, 1.2K, 3.4M.
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
