use serde::de::DeserializeOwned;

use crate::models::career::{CareerGuidance, CareerRecommendations};
use crate::models::resource::ResourceBundle;
use crate::models::roadmap::RoadmapNode;
use crate::render::Render;

/// Static description of one single-prompt tool panel.
pub trait Tool: Send + Sync + 'static {
    type Output: DeserializeOwned + Render + Clone + Send + Sync + 'static;

    const NAME: &'static str;
    const ENDPOINT: &'static str;
    /// Shown when the prompt is blank.
    const EMPTY_INPUT_MESSAGE: &'static str;
    /// Shown for any transport failure; details only go to the log.
    const FAILURE_MESSAGE: &'static str;
}

pub struct CareerSuggestor;

impl Tool for CareerSuggestor {
    type Output = CareerRecommendations;

    const NAME: &'static str = "career-suggestor";
    const ENDPOINT: &'static str = "/api/career-recommendations";
    const EMPTY_INPUT_MESSAGE: &'static str = "Please enter your interests.";
    const FAILURE_MESSAGE: &'static str =
        "Failed to fetch career recommendations. Please try again later.";
}

pub struct CareerGuidanceTool;

impl Tool for CareerGuidanceTool {
    type Output = CareerGuidance;

    const NAME: &'static str = "career-guidance";
    const ENDPOINT: &'static str = "/api/career-guidance";
    const EMPTY_INPUT_MESSAGE: &'static str = "Please enter a desired career.";
    const FAILURE_MESSAGE: &'static str = "Failed to fetch data.";
}

pub struct ResourceFinder;

impl Tool for ResourceFinder {
    type Output = ResourceBundle;

    const NAME: &'static str = "resource-finder";
    const ENDPOINT: &'static str = "/api/resource";
    const EMPTY_INPUT_MESSAGE: &'static str = "Please enter an exam or technology.";
    const FAILURE_MESSAGE: &'static str = "Failed to fetch resources.";
}

pub struct RoadmapMaker;

impl Tool for RoadmapMaker {
    type Output = RoadmapNode;

    const NAME: &'static str = "roadmap-maker";
    const ENDPOINT: &'static str = "/api/tree-data";
    const EMPTY_INPUT_MESSAGE: &'static str = "Please describe the roadmap you need.";
    const FAILURE_MESSAGE: &'static str = "Failed to generate roadmap.";
}
