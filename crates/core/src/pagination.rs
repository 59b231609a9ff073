//! Offset pagination: a normalised [`PageRequest`] in, a [`Page`] envelope out.
//!
//! Page indices are 0-based. Out-of-range inputs are normalised rather than
//! rejected: a negative page becomes 0, a size below 1 falls back to
//! [`DEFAULT_PAGE_SIZE`] and a size above [`MAX_PAGE_SIZE`] is capped.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 2000;

/// Column an anime listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    Id,
    Name,
}

impl SortProperty {
    /// The column name in the `animes` table.
    pub fn column(self) -> &'static str {
        match self {
            SortProperty::Id => "id",
            SortProperty::Name => "name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub property: SortProperty,
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            property: SortProperty::Id,
            direction: SortDirection::Asc,
        }
    }
}

impl Sort {
    /// Parse a `property[,direction]` expression such as `name,desc`.
    pub fn parse(expr: &str) -> Result<Self, CoreError> {
        let mut parts = expr.split(',').map(str::trim);

        let property = match parts.next().unwrap_or_default() {
            p if p.eq_ignore_ascii_case("id") => SortProperty::Id,
            p if p.eq_ignore_ascii_case("name") => SortProperty::Name,
            other => {
                return Err(CoreError::Validation(format!(
                    "sort: unknown property '{other}', expected id or name"
                )))
            }
        };

        let direction = match parts.next() {
            None | Some("") => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(other) => {
                return Err(CoreError::Validation(format!(
                    "sort: unknown direction '{other}', expected asc or desc"
                )))
            }
        };

        if parts.next().is_some() {
            return Err(CoreError::Validation(format!(
                "sort: expected 'property[,direction]', got '{expr}'"
            )));
        }

        Ok(Self {
            property,
            direction,
        })
    }
}

/// A normalised page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
    sort: Sort,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}

impl PageRequest {
    pub fn new(page: Option<i64>, size: Option<i64>, sort: Option<&str>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(0).max(0);
        let size = match size {
            Some(s) if s < 1 => DEFAULT_PAGE_SIZE,
            Some(s) => s.min(MAX_PAGE_SIZE),
            None => DEFAULT_PAGE_SIZE,
        };
        let sort = match sort.map(str::trim) {
            Some(expr) if !expr.is_empty() => Sort::parse(expr)?,
            _ => Sort::default(),
        };
        Ok(Self { page, size, sort })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

/// A slice of a result set plus total-count metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    /// 0-based index of this page.
    pub number: i64,
    /// Requested page size.
    pub size: i64,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let size = request.size();
        let total_elements = total_elements.max(0);
        let total_pages = (total_elements + size - 1) / size;
        let number = request.page();

        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            first: number == 0,
            last: number.saturating_add(1) >= total_pages,
            content,
            total_elements,
            total_pages,
            number,
            size,
        }
    }
}
