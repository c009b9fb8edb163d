//! File name templating
//!
//! Every image on disk is named `<base><date>_<name><ext>`. The remote host
//! names the same files `<base><date><name><ext>`, with no separator.

use crate::error::AppError;

/// Local image path: `base + date + "_" + name + ext`.
///
/// Tokens are concatenated verbatim; separators or URL-unsafe characters in
/// them pass straight through.
pub(crate) fn image_path(base: &str, date: &str, name: &str, ext: &str) -> String {
    let mut path = String::with_capacity(base.len() + date.len() + name.len() + ext.len() + 1);
    path.push_str(base);
    path.push_str(date);
    path.push('_');
    path.push_str(name);
    path.push_str(ext);
    path
}

/// Remote image URL: `base + date + name + ext`.
pub(crate) fn source_url(base: &str, date: &str, name: &str, ext: &str) -> String {
    format!("{base}{date}{name}{ext}")
}

/// Zip two name lists by position. Lists of unequal length are rejected
/// instead of silently dropping the tail.
pub(crate) fn pair_names<'a>(
    inputs: &'a [String],
    outputs: &'a [String],
) -> Result<Vec<(&'a str, &'a str)>, AppError> {
    if inputs.len() != outputs.len() {
        return Err(AppError::NameListMismatch {
            inputs: inputs.len(),
            outputs: outputs.len(),
        });
    }
    Ok(inputs
        .iter()
        .zip(outputs)
        .map(|(i, o)| (i.as_str(), o.as_str()))
        .collect())
}

/// Resolve a per-name extension list. A single entry applies to every name.
pub(crate) fn expand_exts<'a>(exts: &'a [String], count: usize) -> Result<Vec<&'a str>, AppError> {
    match exts {
        [one] => Ok(vec![one.as_str(); count]),
        many if many.len() == count => Ok(many.iter().map(String::as_str).collect()),
        many => Err(AppError::NameListMismatch {
            inputs: count,
            outputs: many.len(),
        }),
    }
}
