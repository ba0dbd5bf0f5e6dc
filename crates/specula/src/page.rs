//! Page windows and pagination configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpecError};

/// A 1-based page window.
///
/// Both the page number and the page size are at least 1; the constructor
/// rejects anything else, so [`skip`](Page::skip) never underflows.
///
/// ```
/// use specula::Page;
///
/// let page = Page::new(3, 10)?;
/// assert_eq!((page.skip(), page.take()), (20, 10));
/// assert!(Page::new(0, 10).is_err());
/// # Ok::<(), specula::SpecError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PageRaw", into = "PageRaw")]
pub struct Page {
    number: usize,
    size: usize,
}

impl Page {
    pub fn new(number: usize, size: usize) -> Result<Self> {
        if number == 0 || size == 0 {
            return Err(SpecError::InvalidPage { number, size });
        }
        Ok(Page { number, size })
    }

    /// The first page of the given size.
    pub fn first(size: usize) -> Result<Self> {
        Page::new(1, size)
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Entities to skip before this page: `(number - 1) * size`.
    ///
    /// Saturates instead of overflowing for absurdly large page numbers,
    /// which then simply yield an empty page.
    pub fn skip(&self) -> usize {
        (self.number - 1).saturating_mul(self.size)
    }

    /// Entities on this page.
    pub fn take(&self) -> usize {
        self.size
    }

    /// The page after this one.
    pub fn next(&self) -> Page {
        Page {
            number: self.number.saturating_add(1),
            size: self.size,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct PageRaw {
    number: usize,
    size: usize,
}

impl From<Page> for PageRaw {
    fn from(page: Page) -> Self {
        PageRaw {
            number: page.number,
            size: page.size,
        }
    }
}

impl TryFrom<PageRaw> for Page {
    type Error = SpecError;

    fn try_from(raw: PageRaw) -> Result<Self> {
        Page::new(raw.number, raw.size)
    }
}

/// Page size limits for listing endpoints.
///
/// Deserializes from any serde format; missing keys take their defaults.
///
/// ```yaml
/// default_page_size: 25
/// max_page_size: 200
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when the caller does not ask for one.
    pub default_page_size: usize,
    /// Largest page size a caller may ask for.
    pub max_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        PaginationConfig {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl PaginationConfig {
    /// Resolves optional request parameters into a page window.
    ///
    /// A missing number means the first page and a missing size means
    /// [`default_page_size`](Self::default_page_size). Sizes above
    /// [`max_page_size`](Self::max_page_size) are rejected, not clamped.
    pub fn resolve(&self, number: Option<usize>, size: Option<usize>) -> Result<Page> {
        let size = size.unwrap_or(self.default_page_size);
        if size > self.max_page_size {
            return Err(SpecError::PageSizeExceeded {
                size,
                max: self.max_page_size,
            });
        }
        Page::new(number.unwrap_or(1), size)
    }

    /// Checks that the configured default is itself a usable size.
    pub fn validate(&self) -> Result<()> {
        if self.max_page_size == 0 {
            return Err(SpecError::invalid_argument("max_page_size", "must be at least 1"));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(SpecError::invalid_argument(
                "default_page_size",
                format!("must be between 1 and {}", self.max_page_size),
            ));
        }
        Ok(())
    }
}
