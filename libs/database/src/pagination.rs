//! Offset paging: what a list endpoint asks for ([`PageRequest`]) and what it
//! gets back ([`Page`]).
//!
//! Page numbers are zero-based. Sorting is expressed with a property type `F`
//! chosen by each domain, so that only whitelisted columns can be ordered on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 2000;
/// Largest page index whose offset still fits a SQL `BIGINT` at any page size.
pub const MAX_PAGE_INDEX: u64 = i64::MAX as u64 / MAX_PAGE_SIZE;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortParseError {
    #[error("sort property must not be empty")]
    EmptyProperty,
    #[error("unknown sort property '{0}'")]
    UnknownProperty(String),
    #[error("unknown sort direction '{0}'")]
    UnknownDirection(String),
}

/// One `property[,direction]` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder<F> {
    pub property: F,
    pub direction: SortDirection,
}

impl<F> SortOrder<F> {
    pub fn asc(property: F) -> Self {
        Self {
            property,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(property: F) -> Self {
        Self {
            property,
            direction: SortDirection::Desc,
        }
    }
}

impl<F: FromStr> FromStr for SortOrder<F> {
    type Err = SortParseError;

    /// Parses `name` or `name,asc` / `name,desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',');
        let name = parts.next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(SortParseError::EmptyProperty);
        }
        let property = name
            .parse::<F>()
            .map_err(|_| SortParseError::UnknownProperty(name.to_string()))?;

        let direction = match parts.next().map(str::trim) {
            None | Some("") => SortDirection::Asc,
            Some(dir) => dir
                .parse()
                .map_err(|_| SortParseError::UnknownDirection(dir.to_string()))?,
        };

        Ok(Self {
            property,
            direction,
        })
    }
}

impl<F: fmt::Display> fmt::Display for SortOrder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.property, self.direction)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<F> {
    /// Zero-based
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortOrder<F>>,
}

impl<F> PageRequest<F> {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, order: SortOrder<F>) -> Self {
        self.sort.push(order);
        self
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl<F> Default for PageRequest<F> {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One slice of a larger result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: u64, size: u64, total_elements: u64) -> Self {
        Self {
            content,
            number,
            size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total_elements.div_ceil(self.size)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(feature = "postgres")]
impl From<SortDirection> for sea_orm::Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => sea_orm::Order::Asc,
            SortDirection::Desc => sea_orm::Order::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
    #[strum(serialize_all = "camelCase")]
    enum Field {
        Id,
        BasePrice,
    }

    #[test]
    fn test_parse_sort_order() {
        let order: SortOrder<Field> = "basePrice,DESC".parse().unwrap();
        assert_eq!(order, SortOrder::desc(Field::BasePrice));

        let order: SortOrder<Field> = "id".parse().unwrap();
        assert_eq!(order, SortOrder::asc(Field::Id));
        assert_eq!(order.to_string(), "id,asc");
    }

    #[test]
    fn test_parse_sort_order_errors() {
        assert_eq!(
            "".parse::<SortOrder<Field>>(),
            Err(SortParseError::EmptyProperty)
        );
        assert_eq!(
            "password".parse::<SortOrder<Field>>(),
            Err(SortParseError::UnknownProperty("password".into()))
        );
        assert_eq!(
            "id,sideways".parse::<SortOrder<Field>>(),
            Err(SortParseError::UnknownDirection("sideways".into()))
        );
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::<Field>::new(1, 10);
        assert_eq!(request.offset(), 10);
        assert_eq!(PageRequest::<Field>::default().size, DEFAULT_PAGE_SIZE);

        let last = PageRequest::<Field>::new(MAX_PAGE_INDEX, MAX_PAGE_SIZE);
        assert!(i64::try_from(last.offset()).is_ok());
    }

    #[test]
    fn test_page_total_pages() {
        let page = Page::new(vec![1, 2, 3], 0, 10, 30);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(Page::new(Vec::<i32>::new(), 0, 10, 31).total_pages(), 4);
        assert_eq!(Page::new(Vec::<i32>::new(), 0, 10, 0).total_pages(), 0);

        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.content, vec![2, 4, 6]);
        assert_eq!(mapped.total_elements, 30);
    }
}
