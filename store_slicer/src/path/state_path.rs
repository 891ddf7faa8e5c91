// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Read and write a nested field of a JSON state tree, addressed by a [`Selector`].
//!
//! - Objects are addressed by key. An index segment uses its decimal text as the key.
//! - Arrays are addressed by index. A key segment only addresses an array element if it
//!   is a canonical unsigned integer.
//! - Scalars have no children.

use serde_json::{Map, Value};

use crate::{PathSegment, Selector, SlicerError, SlicerResult};

/// How many `null` elements [`set_at_path`] will insert to reach an index past the end of
/// an array.
pub const MAX_ARRAY_PADDING: usize = 10_000;

/// Returns the value at `selector`, or `None` if anything along the way is missing.
/// The root selector returns the whole tree.
pub fn get_at_path<'a>(tree: &'a Value, selector: &Selector) -> Option<&'a Value> {
    selector
        .segments()
        .iter()
        .try_fold(tree, |node, segment| match node {
            Value::Object(map) => map.get(&*segment.as_object_key()),
            Value::Array(vec) => segment.as_array_index().and_then(|index| vec.get(index)),
            _ => None,
        })
}

/// Write `new_value` at `selector`, creating whatever is missing along the way:
/// - A missing or scalar (including `null`) intermediate is replaced by an empty array if
///   the segment that indexes into it is numeric, otherwise by an empty object.
/// - Writing past the end of an array pads it with `null`, up to [`MAX_ARRAY_PADDING`]
///   elements.
///
/// The root selector replaces the whole tree. On error, containers created on the way
/// to the failing segment are left in place.
///
/// # Errors
///
/// Returns [`SlicerError::PathConflict`] if a non numeric key has to be used on an
/// existing array, and [`SlicerError::IndexOutOfRange`] if an index is more than
/// [`MAX_ARRAY_PADDING`] past the end of an array.
pub fn set_at_path(
    tree: &mut Value,
    selector: &Selector,
    new_value: Value,
) -> SlicerResult<()> {
    let Some((last, parents)) = selector.segments().split_last() else {
        *tree = new_value;
        return Ok(());
    };

    let mut node = tree;
    for segment in parents {
        node = slot_mut(node, segment, selector)?;
    }
    *slot_mut(node, last, selector)? = new_value;

    Ok(())
}

/// Returns the child slot for `segment` inside `node`, inserting `null` if it doesn't
/// exist yet.
fn slot_mut<'a>(
    node: &'a mut Value,
    segment: &PathSegment,
    selector: &Selector,
) -> SlicerResult<&'a mut Value> {
    match node {
        Value::Object(map) => Ok(map
            .entry(segment.as_object_key().into_owned())
            .or_insert(Value::Null)),
        Value::Array(vec) => {
            let index =
                segment
                    .as_array_index()
                    .ok_or_else(|| SlicerError::PathConflict {
                        selector: selector.to_string(),
                        segment: segment.to_string(),
                    })?;
            if vec.len() <= index {
                let new_len = index
                    .checked_add(1)
                    .filter(|new_len| new_len - vec.len() <= MAX_ARRAY_PADDING + 1)
                    .ok_or_else(|| SlicerError::IndexOutOfRange {
                        selector: selector.to_string(),
                        index,
                        len: vec.len(),
                    })?;
                vec.resize(new_len, Value::Null);
            }
            Ok(&mut vec[index])
        }
        scalar => {
            *scalar = empty_container_for(segment);
            slot_mut(scalar, segment, selector)
        }
    }
}

fn empty_container_for(segment: &PathSegment) -> Value {
    if segment.as_array_index().is_some() {
        Value::Array(vec![])
    } else {
        Value::Object(Map::new())
    }
}
