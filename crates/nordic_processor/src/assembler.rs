/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Relational-to-document assembly.

use log::{debug, info};

use crate::document::Element;
use crate::mode::{Mode, ModeSpec, ID_TAG, LANGUAGE_TAG, NAME_TAG, TYPE_TAG};
use crate::rows::EntityRow;
use crate::source::{RawRow, RowSource};
use crate::text::{fixup_text, SanitizeOptions};
use crate::ProcessorError;

/// Builds one element per entity row and collects them under a root.
///
/// Assembly is strictly sequential: an entity, including all of its related
/// rows, is finished before the next entity row is taken from the source.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    options: SanitizeOptions,
}

impl Assembler {
    pub fn new(options: SanitizeOptions) -> Self {
        Self { options }
    }

    /// Assemble the whole document for `mode`, in row-source order.
    pub fn assemble_document<S>(&self, mode: Mode, source: &S) -> Result<Element, ProcessorError>
    where
        S: RowSource + ?Sized,
    {
        let spec = mode.spec();
        let mut root = Element::new(spec.root_tag);
        for row in source.entities(mode)? {
            root.push(self.assemble_entity(spec, &row, source)?);
        }
        info!("assembled {} {} entries", root.children.len(), mode);
        Ok(root)
    }

    /// Assemble one entity element.
    ///
    /// Children come in a fixed order: name, type, language, the mode's
    /// collections, id, then the free-text fields that are non-empty after
    /// cleanup. Collections are always present, possibly empty.
    pub fn assemble_entity<S>(
        &self,
        spec: &ModeSpec,
        row: &RawRow,
        source: &S,
    ) -> Result<Element, ProcessorError>
    where
        S: RowSource + ?Sized,
    {
        let entity = EntityRow::from_raw(row)?;
        debug!(
            "{} {}: {}",
            spec.entity_tag,
            entity.id,
            entity.name.as_deref().unwrap_or_default()
        );

        let mut node = Element::new(spec.entity_tag)
            .with_child(Element::optional_text(NAME_TAG, entity.name.as_deref()))
            .with_child(Element::optional_text(
                TYPE_TAG,
                entity.part_of_speech.as_deref(),
            ))
            .with_child(Element::optional_text(
                LANGUAGE_TAG,
                entity.language_code.as_deref(),
            ));

        for collection in spec.collections {
            let mut wrapper = Element::new(collection.tag);
            for related in source.related(collection.kind, entity.id)? {
                wrapper.push((collection.transform)(&related, &self.options)?);
            }
            node.push(wrapper);
        }

        node.push(Element::text_element(ID_TAG, entity.id.to_string()));

        for field in spec.optional_fields {
            if let Some(fixed) = fixup_text((field.value)(&entity), &self.options)? {
                node.push(Element::new(field.tag).with_children(fixed.into_nodes()));
            }
        }

        Ok(node)
    }
}
