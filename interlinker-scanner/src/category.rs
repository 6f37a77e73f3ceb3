use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The page categories an operator can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageCategory {
    BlogPages,
    BlogCategories,
    ProductPages,
    AllPages,
}

impl PageCategory {
    pub const ALL: [PageCategory; 4] = [
        PageCategory::BlogPages,
        PageCategory::BlogCategories,
        PageCategory::ProductPages,
        PageCategory::AllPages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageCategory::BlogPages => "blog-pages",
            PageCategory::BlogCategories => "blog-categories",
            PageCategory::ProductPages => "product-pages",
            PageCategory::AllPages => "all-pages",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PageCategory::BlogPages => "Blog Pages",
            PageCategory::BlogCategories => "Blog Categories",
            PageCategory::ProductPages => "Product Pages",
            PageCategory::AllPages => "All Pages",
        }
    }

    pub fn filter(&self) -> CategoryFilter {
        match self {
            PageCategory::BlogPages => CategoryFilter::Keyword("/blog".to_string()),
            PageCategory::BlogCategories => CategoryFilter::Keyword("/category".to_string()),
            PageCategory::ProductPages => {
                CategoryFilter::AnyOf(vec!["/product".to_string(), "/products".to_string()])
            }
            PageCategory::AllPages => CategoryFilter::AllPages,
        }
    }
}

impl fmt::Display for PageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PageCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "blogpages" | "blog" => Ok(PageCategory::BlogPages),
            "blogcategories" | "categories" => Ok(PageCategory::BlogCategories),
            "productpages" | "products" => Ok(PageCategory::ProductPages),
            "allpages" | "all" => Ok(PageCategory::AllPages),
            _ => Err(format!("unknown page category '{}'", s)),
        }
    }
}

/// URL predicate deciding which pages are recorded and which links are followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    AllPages,
    Keyword(String),
    AnyOf(Vec<String>),
}

impl CategoryFilter {
    /// Builds a filter from raw path keywords; no keywords means every page.
    pub fn from_keywords(keywords: &[String]) -> Self {
        let mut keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        match keywords.len() {
            0 => CategoryFilter::AllPages,
            1 => CategoryFilter::Keyword(keywords.remove(0)),
            _ => CategoryFilter::AnyOf(keywords),
        }
    }

    pub fn accepts(&self, url: &str) -> bool {
        match self {
            CategoryFilter::AllPages => true,
            CategoryFilter::Keyword(keyword) => url.contains(keyword.as_str()),
            CategoryFilter::AnyOf(keywords) => keywords.iter().any(|k| url.contains(k.as_str())),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::AllPages => f.write_str("all pages"),
            CategoryFilter::Keyword(keyword) => write!(f, "URLs containing '{}'", keyword),
            CategoryFilter::AnyOf(keywords) => {
                let quoted: Vec<String> = keywords.iter().map(|k| format!("'{}'", k)).collect();
                write!(f, "URLs containing any of {}", quoted.join(", "))
            }
        }
    }
}

impl From<PageCategory> for CategoryFilter {
    fn from(category: PageCategory) -> Self {
        category.filter()
    }
}
