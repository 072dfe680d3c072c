//! Tag intersection.

/// Returns `true` when `a` and `b` share at least one tag.
///
/// Empty sets never intersect.
///
/// # Example
/// ```
/// use observable::tags_intersect;
///
/// assert!(tags_intersect(&["a", "b"], &["b"]));
/// assert!(!tags_intersect(&["a"], &["c"]));
/// assert!(!tags_intersect::<&str, &str>(&[], &["a"]));
/// ```
pub fn tags_intersect<A, B>(a: &[A], b: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    a.iter()
        .any(|x| b.iter().any(|y| x.as_ref() == y.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_string_types() {
        let owned = vec![String::from("ui"), String::from("net")];
        assert!(tags_intersect(&owned, &["net"]));
        assert!(!tags_intersect(&owned, &["db"]));
    }
}
