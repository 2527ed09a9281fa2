use crate::domain::model::{ArticleGroup, CollectedItem, PhotoFile, RequiredGroup, ResultTree};
use crate::utils::error::{CollectError, Result};
use std::collections::HashSet;

/// Attaches to every item each photo whose stem contains the item's barcode.
pub fn fill_photos(items: &mut [CollectedItem], photos: &[PhotoFile]) {
    for item in items.iter_mut() {
        let barcode = item.item.barcode.as_str();
        item.photos.extend(
            photos
                .iter()
                .filter(|photo| photo.stem.contains(barcode))
                .cloned(),
        );
    }
}

/// Builds the result tree from already filled items.
///
/// Under each required article, every distinct article takes the photos of
/// the first item in `items` carrying that article. Later items with the same
/// article are ignored even when their photos differ.
pub fn group_by_article(
    required_articles: &[String],
    items: &[CollectedItem],
) -> Result<ResultTree> {
    let mut groups = Vec::new();
    let mut seen_required = HashSet::new();

    for required_article in required_articles {
        if !seen_required.insert(required_article.as_str()) {
            continue;
        }

        let mut seen_articles = HashSet::new();
        let articles: Vec<&str> = items
            .iter()
            .filter(|item| &item.required_article == required_article)
            .map(CollectedItem::article)
            .filter(|article| seen_articles.insert(*article))
            .collect();

        let mut article_groups = Vec::with_capacity(articles.len());
        for article in articles {
            let first = first_item_for(items, article)?;
            log_discarded_photos(items, first);
            article_groups.push(ArticleGroup {
                article: article.to_string(),
                photos: first.photos.clone(),
            });
        }

        groups.push(RequiredGroup {
            required_article: required_article.clone(),
            articles: article_groups,
        });
    }

    Ok(ResultTree::new(groups))
}

/// Fill and grouping in one step.
pub fn build_result_tree(
    required_articles: &[String],
    mut items: Vec<CollectedItem>,
    photos: &[PhotoFile],
) -> Result<ResultTree> {
    fill_photos(&mut items, photos);
    group_by_article(required_articles, &items)
}

fn first_item_for<'a>(items: &'a [CollectedItem], article: &str) -> Result<&'a CollectedItem> {
    items
        .iter()
        .find(|item| item.article() == article)
        .ok_or_else(|| CollectError::InvariantViolation {
            message: format!("no inventory item carries article {:?}", article),
        })
}

fn log_discarded_photos(items: &[CollectedItem], first: &CollectedItem) {
    for other in items
        .iter()
        .filter(|item| item.article() == first.article() && !std::ptr::eq(*item, first))
    {
        if other.photos != first.photos {
            tracing::debug!(
                "Article {:?}: keeping photos of barcode {} and ignoring {} photo(s) of barcode {}",
                first.article(),
                first.barcode(),
                other.photos.len(),
                other.barcode()
            );
        }
    }
}
