//! The pagination calculator: turns a request path plus template-level
//! overrides into an unambiguous window over a page's approved comments, and
//! builds the canonical URL for any comment page. URL parsing and link
//! generation share the same segment convention so the two never drift.

use std::str::FromStr;

use crate::errors::CommentsError;
use crate::models::Comment;

pub const DEFAULT_ORDER_BY: &str = "created_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

impl FromStr for OrderDirection {
    type Err = CommentsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(OrderDirection::Asc),
            "desc" => Ok(OrderDirection::Desc),
            _ => Err(CommentsError::InvalidPaginationConfig(
                "the order attribute of the comments tag must be either \"asc\" or \"desc\""
                    .to_string(),
            )),
        }
    }
}

/// Site-wide pagination configuration.
#[derive(Debug, Clone)]
pub struct PaginationDefaults {
    pub per_page: u32,
    /// Path segment between the page URL and the page number,
    /// e.g. "comments/page/" in "/blog/hello/comments/page/3/".
    pub segment: String,
}

impl Default for PaginationDefaults {
    fn default() -> Self {
        Self {
            per_page: 10,
            segment: "comments/page/".to_string(),
        }
    }
}

/// Raw attribute overrides from the calling template.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides<'a> {
    pub page: Option<&'a str>,
    pub per_page: Option<&'a str>,
    pub by: Option<&'a str>,
    pub order: Option<&'a str>,
}

/// A fully resolved window: which slice of approved comments to show and in
/// what order.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub page_number: u32,
    pub per_page: u32,
    pub order_by: String,
    pub direction: OrderDirection,
}

impl WindowSpec {
    pub fn offset(&self) -> i64 {
        (i64::from(self.page_number) - 1) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

/// Resolve the window for a request. Precedence per knob: explicit template
/// attribute, then the number embedded in the request path, then defaults.
/// Misconfigured attributes fail rather than being silently corrected.
pub fn resolve(
    overrides: &Overrides<'_>,
    request_path: &str,
    page_url: &str,
    defaults: &PaginationDefaults,
) -> Result<WindowSpec, CommentsError> {
    let page_number = match overrides.page {
        Some(raw) => parse_positive(raw).ok_or_else(|| {
            CommentsError::InvalidPaginationConfig(
                "the page attribute of the comments tag must be a positive integer".to_string(),
            )
        })?,
        None => page_number_in_path(request_path, page_url, &defaults.segment).unwrap_or(1),
    };

    let per_page = match overrides.per_page {
        Some(raw) => parse_positive(raw).ok_or_else(|| {
            CommentsError::InvalidPaginationConfig(
                "the per_page attribute of the comments tag must be a positive integer"
                    .to_string(),
            )
        })?,
        None => defaults.per_page,
    };
    if per_page == 0 {
        return Err(CommentsError::InvalidPaginationConfig(
            "the per_page attribute of the comments tag must be a positive integer".to_string(),
        ));
    }

    let order_by = overrides.by.unwrap_or(DEFAULT_ORDER_BY).trim().to_string();
    if !Comment::FIELDS.contains(&order_by.as_str()) {
        return Err(CommentsError::InvalidPaginationConfig(
            "the by attribute of the comments tag must specify a valid field name".to_string(),
        ));
    }

    let direction = overrides.order.unwrap_or("desc").parse::<OrderDirection>()?;

    Ok(WindowSpec {
        page_number,
        per_page,
        order_by,
        direction,
    })
}

fn parse_positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// Page number embedded in a request path for a known page URL, i.e. the
/// path is exactly `<page_url><segment><digits>` with an optional trailing
/// slash. Returns None for the bare page URL (page 1). Only numbers from 1
/// up count as page numbers; `.../page/0/` is no more a comment page than
/// `.../page/x/`.
pub fn page_number_in_path(path: &str, page_url: &str, segment: &str) -> Option<u32> {
    let rest = path.strip_prefix(page_url)?.strip_prefix(segment)?;
    let digits = rest.strip_suffix('/').unwrap_or(rest);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    parse_positive(digits)
}

/// Recognize the paginated variant of any page URL without knowing the page
/// in advance: `<base><segment><digits>[/]` splits into the bare page URL
/// and the page number. Both address the same page identity.
pub fn split_paginated_path(path: &str, segment: &str) -> Option<(String, u32)> {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let digit_start = trimmed
        .rfind(|c: char| !c.is_ascii_digit())
        .map(|i| i + 1)
        .unwrap_or(0);
    let digits = &trimmed[digit_start..];
    if digits.is_empty() {
        return None;
    }
    let base = trimmed[..digit_start].strip_suffix(segment)?;
    Some((base.to_string(), parse_positive(digits)?))
}

/// Canonical URL for a given comment page. Page 1 is addressed by the bare
/// page URL; higher pages get the segment and a trailing slash.
pub fn page_url(base: &str, segment: &str, page_number: u32) -> String {
    if page_number <= 1 {
        base.to_string()
    } else {
        format!("{}{}{}/", base, segment, page_number)
    }
}

pub fn total_pages(total: i64, per_page: u32) -> u32 {
    if total <= 0 {
        return 1;
    }
    let per = i64::from(per_page.max(1));
    ((total + per - 1) / per) as u32
}
