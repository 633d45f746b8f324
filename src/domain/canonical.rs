/// Field carrying the signature; never part of the signed string.
pub const SIGN_FIELD: &str = "sign";

/// Builds the string that is signed and verified.
///
/// Keys are sorted in byte order, empty values and the `sign` field are
/// dropped, and the rest is joined as `key=value` pairs separated by `&`.
/// No encoding is applied here.
pub fn canonicalize<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(K, V)> = entries
        .into_iter()
        .filter(|(k, v)| k.as_ref() != SIGN_FIELD && !v.as_ref().is_empty())
        .collect();
    pairs.sort_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));

    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
        .collect::<Vec<_>>()
        .join("&")
}
