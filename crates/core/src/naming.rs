//! Export filename convention.
//!
//! Filenames end up in a `Content-Disposition` header and on the user's disk,
//! so only `[A-Za-z0-9_-]` survives from the character name.

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build the export filename for a character.
///
/// Convention: `profile_{stem}.{extension}`
///
/// # Examples
///
/// ```
/// use roster_core::naming::export_filename;
///
/// assert_eq!(export_filename("Walter White", "pdf"), "profile_Walter_White.pdf");
/// assert_eq!(export_filename("Gus", "html"), "profile_Gus.html");
/// ```
pub fn export_filename(name: &str, extension: &str) -> String {
    format!("profile_{}.{extension}", sanitize_file_stem(name))
}
