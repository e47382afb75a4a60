//! Structural validation.
//!
//! Shape-only checks over the raw `relationships` data, independent of the
//! entity index: malformed edges must never crash graph traversal, so this
//! pass runs first, in isolation, and its findings do not block forward or
//! backward validation of the remaining well-formed edges.

use regex::Regex;
use std::sync::OnceLock;

use linkograph_model::RawEntity;

use crate::findings::{Category, Finding};

/// Declared convention for section (relationship field) names.
fn lower_camel_case() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").expect("valid regex"))
}

/// Metadata keys validated for type only, never semantics.
const METADATA_KEYS: [&str; 3] = ["frequency", "severity", "note"];

fn structural(source_id: &str, message: String) -> Finding {
    Finding::new(Category::Structural, message).with_source(source_id)
}

fn check_item(
    source_id: &str,
    section: &str,
    idx: usize,
    item: &serde_json::Value,
    findings: &mut Vec<Finding>,
) {
    let Some(obj) = item.as_object() else {
        findings.push(
            structural(
                source_id,
                format!("edge item {idx} in section `{section}` is not an object"),
            )
            .with_field(section),
        );
        return;
    };

    match obj.get("id") {
        Some(serde_json::Value::String(id)) if !id.is_empty() => {}
        Some(_) => findings.push(
            structural(
                source_id,
                format!("edge item {idx} in section `{section}` has a non-string or empty `id`"),
            )
            .with_field(section),
        ),
        None => {
            // Legacy spelling keeps the edge usable; flag it, don't fail it.
            match obj.get("target_id") {
                Some(serde_json::Value::String(id)) if !id.is_empty() => findings.push(
                    Finding::new(
                        Category::NamingConvention,
                        format!(
                            "edge item {idx} in section `{section}` uses legacy key `target_id` (expected `id`)"
                        ),
                    )
                    .with_source(source_id)
                    .with_field(section)
                    .with_target(id.clone()),
                ),
                _ => findings.push(
                    structural(
                        source_id,
                        format!("edge item {idx} in section `{section}` is missing required key `id`"),
                    )
                    .with_field(section),
                ),
            }
        }
    }

    match obj.get("url") {
        Some(serde_json::Value::String(url)) if !url.is_empty() => {}
        Some(_) => findings.push(
            structural(
                source_id,
                format!("edge item {idx} in section `{section}` has a non-string or empty `url`"),
            )
            .with_field(section),
        ),
        None => findings.push(
            structural(
                source_id,
                format!("edge item {idx} in section `{section}` is missing required key `url`"),
            )
            .with_field(section),
        ),
    }

    if let Some(name) = obj.get("name") {
        if !name.is_string() {
            findings.push(
                structural(
                    source_id,
                    format!("edge item {idx} in section `{section}` has a non-string `name`"),
                )
                .with_field(section),
            );
        }
    }

    for key in METADATA_KEYS {
        if let Some(value) = obj.get(key) {
            if !value.is_string() {
                findings.push(
                    structural(
                        source_id,
                        format!(
                            "edge item {idx} in section `{section}` has a non-string `{key}`"
                        ),
                    )
                    .with_field(section),
                );
            }
        }
    }
}

/// Shape-check one entity's raw relationship structure.
///
/// Absent `relationships` is not a structural problem (the pipeline flags
/// it as an orphan); everything else must follow the explicit
/// category → section → `items` schema.
pub fn validate_structure(source_id: &str, entity: &RawEntity) -> Vec<Finding> {
    let mut findings = Vec::new();

    let Some(relationships) = entity.relationships.as_ref() else {
        return findings;
    };
    let Some(categories) = relationships.as_object() else {
        findings.push(structural(
            source_id,
            "`relationships` is not an object".to_string(),
        ));
        return findings;
    };

    for (category, category_value) in categories {
        let Some(sections) = category_value.as_object() else {
            findings.push(structural(
                source_id,
                format!("relationship category `{category}` is not an object"),
            ));
            continue;
        };

        for (section, section_value) in sections {
            if !lower_camel_case().is_match(section) {
                findings.push(
                    Finding::new(
                        Category::NamingConvention,
                        format!("section name `{section}` is not lowerCamelCase"),
                    )
                    .with_source(source_id)
                    .with_field(section.clone()),
                );
            }

            let Some(section_obj) = section_value.as_object() else {
                findings.push(
                    structural(
                        source_id,
                        format!("section `{section}` is not an object"),
                    )
                    .with_field(section.clone()),
                );
                continue;
            };

            match section_obj.get("items") {
                Some(serde_json::Value::Array(items)) => {
                    for (idx, item) in items.iter().enumerate() {
                        check_item(source_id, section, idx, item, &mut findings);
                    }
                }
                Some(_) => findings.push(
                    structural(
                        source_id,
                        format!("section `{section}` has `items` that is not a list"),
                    )
                    .with_field(section.clone()),
                ),
                None => findings.push(
                    structural(
                        source_id,
                        format!("section `{section}` is missing required key `items`"),
                    )
                    .with_field(section.clone()),
                ),
            }
        }
    }

    findings
}
