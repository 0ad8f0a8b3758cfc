/// Loose email shape check: one `@`, a non-empty local part and a dotted domain.
#[must_use]
pub fn is_plausible_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let mut labels = domain.split('.');
    let first_ok = labels.next().is_some_and(|label| !label.is_empty());
    let rest: Vec<&str> = labels.collect();
    first_ok && !rest.is_empty() && rest.iter().all(|label| !label.is_empty())
}

pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
