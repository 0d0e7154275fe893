//! Component section reader
//!
//! Scans a text model for `<ComponentName> NAME <TypeComponent>` declarations
//! and runs the attribute loop for each one. Everything between declarations
//! (topology lines, counts, other sections) is skipped.

use crate::component::Component;
use crate::config::compile_time::parsing::MAX_COMPONENTS;
use crate::config::runtime::ParserPreferences;
use crate::lexical::tokenizer::closing_tag;
use crate::lexical::{LineCursor, LineSource, ParseError};
use crate::logging::codes;
use crate::log_success;

/// Token that opens a declaration
pub const COMPONENT_NAME_TAG: &str = "<ComponentName>";

/// Token that ends the model body
pub const END_OF_MODEL_TAG: &str = "</Nnet3>";

/// Read every component declaration from `cursor`, in source order.
///
/// Ids follow declaration order and inputs start empty; only promoted
/// constants are wired in by the read loop.
pub fn read_components<S: LineSource>(
    cursor: &mut LineCursor<S>,
    preferences: &ParserPreferences,
) -> Result<Vec<Component>, ParseError> {
    let mut components: Vec<Component> = Vec::new();
    // Set when an attribute loop stopped on the next declaration's tag
    let mut pending_declaration = false;

    loop {
        if !pending_declaration {
            match cursor.next_token() {
                Some(END_OF_MODEL_TAG) => break,
                Some(COMPONENT_NAME_TAG) => {}
                Some(_) => continue,
                None => {
                    if cursor.advance_line() {
                        continue;
                    }
                    break;
                }
            }
        }

        if components.len() >= MAX_COMPONENTS {
            return Err(ParseError::TooManyComponents {
                limit: MAX_COMPONENTS,
            });
        }

        let (component, next_is_declaration) =
            read_declaration(cursor, components.len(), preferences)?;
        pending_declaration = next_is_declaration;
        components.push(component);
    }

    log_success!(
        codes::success::COMPONENT_SECTION_COMPLETE,
        "Component section read",
        "components" => components.len(),
        "lines" => cursor.lines_read()
    );

    Ok(components)
}

/// Read one declaration after its `<ComponentName>` tag.
///
/// Returns the component and whether the loop ended on the next declaration.
fn read_declaration<S: LineSource>(
    cursor: &mut LineCursor<S>,
    id: usize,
    preferences: &ParserPreferences,
) -> Result<(Component, bool), ParseError> {
    let name = match cursor.next_token() {
        Some(name) => name.to_owned(),
        None => {
            return Err(ParseError::MissingValue {
                expected: "component name",
                at: cursor.position(),
            })
        }
    };

    let declared_at = cursor.position();
    let type_tag = cursor.read_component_type_tag()?;
    let mut component = Component::declared(id, name, &type_tag, declared_at)?;

    let end_tag = closing_tag(&type_tag);
    let terminator = component.read_attributes(
        cursor,
        &[end_tag.as_str(), COMPONENT_NAME_TAG],
        preferences,
    )?;

    if preferences.log_component_summaries {
        log_success!(
            codes::success::COMPONENT_PARSED,
            "Component parsed",
            "id" => component.id(),
            "name" => component.name(),
            "type" => component.type_tag(),
            "attributes" => component.attributes().len(),
            "constants" => component.constants().len()
        );
    }

    Ok((component, terminator == COMPONENT_NAME_TAG))
}
