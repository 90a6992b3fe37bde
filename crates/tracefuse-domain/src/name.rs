//! Splitting of compound identifiers into name parts

/// Split a compound name into its parts
///
/// Separators are any non-alphanumeric characters; camel-case boundaries and
/// the end of an upper-case acronym also start a new part.
///
/// # Examples
///
/// ```
/// use tracefuse_domain::split_name_parts;
///
/// assert_eq!(split_name_parts("HTTPRequestHandler"), vec!["HTTP", "Request", "Handler"]);
/// assert_eq!(split_name_parts("user_service"), vec!["user", "service"]);
/// assert_eq!(split_name_parts("org.example.Core"), vec!["org", "example", "Core"]);
/// ```
pub fn split_name_parts(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                parts.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let lower_to_upper = prev.is_lowercase() && c.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if lower_to_upper || acronym_end {
                parts.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(split_name_parts("DatabaseServer"), vec!["Database", "Server"]);
        assert_eq!(split_name_parts("getHTTPResponse"), vec!["get", "HTTP", "Response"]);
    }

    #[test]
    fn test_separators() {
        assert_eq!(split_name_parts("web-ui client"), vec!["web", "ui", "client"]);
        assert_eq!(split_name_parts("__init__"), vec!["init"]);
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(split_name_parts("Cache"), vec!["Cache"]);
        assert!(split_name_parts("").is_empty());
        assert!(split_name_parts("::").is_empty());
    }
}
