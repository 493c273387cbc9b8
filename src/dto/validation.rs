//! Validation helpers shared by partial update payloads.

/// Reports whether any of the given optional fields arrived present but empty.
///
/// Partial updates treat an absent field as "leave unchanged", so only a
/// field that was sent as an empty string counts as blank.
///
/// # Examples
///
/// ```ignore
/// any_blank([&None, &Some("kept".into())])  // false
/// any_blank([&Some(String::new()), &None])  // true
/// ```
pub fn any_blank<'a>(fields: impl IntoIterator<Item = &'a Option<String>>) -> bool {
    fields
        .into_iter()
        .any(|field| field.as_deref().is_some_and(str::is_empty))
}
