// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Action type names. Every generic action is tagged `GENERIC_<name>`, where `<name>`
//! is derived from the slice's selector unless the slice was given one.

/// Tag prefix that marks an action as carrying a function payload.
pub const GENERIC_ACTION_PREFIX: &str = "GENERIC";

/// Derive a stable action type name from a selector. Every character that isn't ASCII
/// alphanumeric, `_`, `!`, or `?` becomes `_`, and the result is upper cased.
///
/// ```
/// use r3bl_store_slicer::create_valid_type_name;
///
/// assert_eq!(create_valid_type_name("todos.items[0]"), "TODOS_ITEMS_0_");
/// ```
pub fn create_valid_type_name(selector: &str) -> String {
    selector
        .chars()
        .map(|ch| match ch {
            ch if ch.is_ascii_alphanumeric() => ch.to_ascii_uppercase(),
            '_' | '!' | '?' => ch,
            _ => '_',
        })
        .collect()
}

pub fn generic_action_type(name: &str) -> String {
    format!("{GENERIC_ACTION_PREFIX}_{name}")
}

/// `true` for exactly [`GENERIC_ACTION_PREFIX`] or anything starting with it followed by
/// `_`.
pub fn is_generic_action_type(action_type: &str) -> bool {
    match action_type.strip_prefix(GENERIC_ACTION_PREFIX) {
        Some(rest) => rest.is_empty() || rest.starts_with('_'),
        None => false,
    }
}
