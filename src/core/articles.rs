use crate::core::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// One required article per line, surrounding whitespace trimmed.
///
/// Blank lines are kept as empty entries and repeated articles are not
/// collapsed.
pub fn parse_required_articles(content: &str) -> Vec<String> {
    content.lines().map(|line| line.trim().to_string()).collect()
}

pub async fn load_required_articles<S: Storage>(storage: &S, path: &Path) -> Result<Vec<String>> {
    let content = storage.read_to_string(path).await?;
    let articles = parse_required_articles(&content);
    tracing::debug!(
        "Read {} required articles from {}",
        articles.len(),
        path.display()
    );
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_trimmed() {
        let articles = parse_required_articles("  SKU1 \nSKU2\r\n\tSKU3\n");
        assert_eq!(articles, vec!["SKU1", "SKU2", "SKU3"]);
    }

    #[test]
    fn test_duplicates_and_blank_lines_kept() {
        let articles = parse_required_articles("SKU1\n\nSKU1");
        assert_eq!(articles, vec!["SKU1", "", "SKU1"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_required_articles("").is_empty());
    }
}
