//! Display labels for method inputs.

use crate::matcher::match_array;
use crate::types::MethodInput;

/// Label text used when an input has neither a name nor an internal type.
pub const UNNAMED_ARGUMENT: &str = "<unnamed argument>";

/// `"<name> (<type>)"`, with a trailing `*` for required inputs.
///
/// Falls back to the internal type, then to [`UNNAMED_ARGUMENT`], when the
/// name is empty.
pub fn field_label(input: &MethodInput, is_required: bool) -> String {
    field_label_with(input, is_required, UNNAMED_ARGUMENT)
}

pub(crate) fn field_label_with(input: &MethodInput, is_required: bool, placeholder: &str) -> String {
    let name = Some(input.name.as_str())
        .filter(|n| !n.is_empty())
        .or_else(|| input.internal_type.as_deref().filter(|t| !t.is_empty()))
        .unwrap_or(placeholder);
    let marker = if is_required { "*" } else { "" };
    format!("{name} ({}){marker}", input.ty)
}

/// Describe the `index`-th row of an array input.
///
/// The copy gets the element type, the element's internal type with any
/// `struct ` qualifier removed, and a `#<n>` name (1-based) followed by that
/// internal type when there is one. `data` itself is left untouched.
pub fn transform_for_array_item(data: &MethodInput, index: usize) -> MethodInput {
    let ty = match_array(&data.ty)
        .map(|m| m.item_type)
        .filter(|t| !t.is_empty())
        .unwrap_or(&data.ty);

    let internal_type = data
        .internal_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .and_then(match_array)
        .map(|m| m.item_type.replace("struct ", ""))
        .filter(|t| !t.is_empty());

    let name = match &internal_type {
        Some(t) => format!("#{} {t}", index + 1),
        None => format!("#{}", index + 1),
    };

    MethodInput {
        name,
        ty: ty.to_string(),
        internal_type,
        components: data.components.clone(),
    }
}
