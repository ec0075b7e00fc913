use async_trait::async_trait;

use crate::domain::category::Category;

/// Turns a free-text description into short keyword tags for one category.
///
/// Implementations recover from their own failures and always return at
/// least one tag; the dialogue never sees an extraction error.
#[async_trait]
pub trait TagExtraction: Send + Sync {
    async fn extract(&self, text: &str, category: Category, people_count: u32) -> Vec<String>;
}
