//! Keyword templates per plan type

use super::types::PlanType;
use crate::utils::MAX_PLAN_KEYWORDS;

const TECHNOLOGY: &[&str] = &["{topic}", "{topic} tutorial", "{topic} documentation"];
const RESEARCH: &[&str] = &["{topic} research", "{topic} paper", "{topic} analysis report"];
const NEWS: &[&str] = &["{topic} news", "{topic} latest", "{topic} updates"];
const COMPARISON: &[&str] = &["{topic} comparison", "{topic} vs", "{topic} review"];
const TUTORIAL: &[&str] = &["{topic} tutorial", "{topic} how to", "{topic} guide"];

/// Templates merged by the comprehensive plan, in this order
const COMPREHENSIVE_SOURCES: &[&[&str]] = &[TECHNOLOGY, RESEARCH, NEWS, COMPARISON, TUTORIAL];

/// How many templates of each type the comprehensive plan takes
const COMPREHENSIVE_PER_TYPE: usize = 2;

/// Expand the template set for `plan_type` with `topic`.
///
/// The result is free of duplicates and never longer than
/// [`MAX_PLAN_KEYWORDS`].
pub(crate) fn keywords_for(plan_type: PlanType, topic: &str) -> Vec<String> {
    let templates: Vec<&str> = match plan_type {
        PlanType::Technology => TECHNOLOGY.to_vec(),
        PlanType::Research => RESEARCH.to_vec(),
        PlanType::News => NEWS.to_vec(),
        PlanType::Comparison => COMPARISON.to_vec(),
        PlanType::Tutorial => TUTORIAL.to_vec(),
        PlanType::Comprehensive => COMPREHENSIVE_SOURCES
            .iter()
            .flat_map(|set| set.iter().take(COMPREHENSIVE_PER_TYPE).copied())
            .collect(),
    };

    let mut keywords: Vec<String> = Vec::with_capacity(templates.len());
    for template in templates {
        let keyword = template.replace("{topic}", topic);
        if !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }
    keywords.truncate(MAX_PLAN_KEYWORDS);
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn technology_starts_with_bare_topic() {
        assert_eq!(
            keywords_for(PlanType::Technology, "Rust"),
            vec!["Rust", "Rust tutorial", "Rust documentation"]
        );
    }

    #[test]
    fn comprehensive_is_deduplicated_and_capped() {
        let kws = keywords_for(PlanType::Comprehensive, "wasm");
        assert_eq!(kws.len(), MAX_PLAN_KEYWORDS);
        assert_eq!(kws[0], "wasm");
        assert_eq!(kws[1], "wasm tutorial");
        assert_eq!(kws.iter().filter(|k| *k == "wasm tutorial").count(), 1);
        assert!(!kws.contains(&"wasm how to".to_string()));
    }
}
