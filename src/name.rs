use anyhow::{Result, anyhow};

/// Types that expose a display name.
pub trait HasName {
    fn get_name(&self) -> &str;
}

impl<T: HasName + ?Sized> HasName for &T {
    fn get_name(&self) -> &str {
        (*self).get_name()
    }
}

/// Sorting helpers for slices of `T: HasName`.
pub trait SortByName {
    /// Stable, ascending, case-insensitive sort by `get_name()`.
    fn sort_by_name(&mut self);
}

impl<T: HasName> SortByName for [T] {
    fn sort_by_name(&mut self) {
        self.sort_by_cached_key(|a| a.get_name().to_lowercase());
    }
}

/// Trims a display name and rejects empty ones.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Name must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Case-insensitive substring match used by room search.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(String);
    impl HasName for Named {
        fn get_name(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let mut items = vec![
            Named("storage".to_string()),
            Named("Kitchen".to_string()),
            Named("break room".to_string()),
        ];
        items.as_mut_slice().sort_by_name();
        assert_eq!(items[0].get_name(), "break room");
        assert_eq!(items[1].get_name(), "Kitchen");
        assert_eq!(items[2].get_name(), "storage");
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Floor 1 ").unwrap(), "Floor 1");
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Meeting Room A", "meeting"));
        assert!(!contains_ignore_case("Kitchen", "office"));
    }
}
