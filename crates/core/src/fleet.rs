// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executor fleet classification.
//!
//! Executors from 1.1.0 onwards register a `version` node; older ones do
//! not. The classification answers "is this domain legacy, current, or mixed"
//! and, given a target version, "is every executor at least that new".

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::num::ParseIntError;

/// Result of classifying an executor population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainClass {
    /// Every executor lacks a version marker
    Legacy,
    /// Every executor has a version marker
    Current,
    /// Empty fleet, or a mix that cannot be classified
    Unknown,
    /// Every executor is below the target version
    AllBelow,
    /// Every executor is at or above the target version
    AllAboveOrEqual,
    /// Executors on both sides of the target version
    Mixed,
}

impl DomainClass {
    /// Stable numeric code used by consumers of the classification.
    pub fn code(&self) -> i32 {
        match self {
            DomainClass::Legacy => 0,
            DomainClass::Current => 1,
            DomainClass::Unknown => -1,
            DomainClass::AllBelow => -2,
            DomainClass::AllAboveOrEqual => 2,
            DomainClass::Mixed => -3,
        }
    }
}

crate::simple_display! {
    DomainClass {
        Legacy => "LEGACY",
        Current => "CURRENT",
        Unknown => "UNKNOWN",
        AllBelow => "ALL_BELOW",
        AllAboveOrEqual => "ALL_ABOVE_OR_EQUAL",
        Mixed => "MIXED",
    }
}

/// Compare dot-separated numeric versions.
///
/// Corresponding segments are compared left to right and the first
/// difference decides. When all shared segments are equal the version with
/// more segments is greater (`1.0.0.1 > 1.0.0`).
pub fn compare_version(a: &str, b: &str) -> Result<Ordering, ParseIntError> {
    let left: Vec<&str> = a.split('.').collect();
    let right: Vec<&str> = b.split('.').collect();
    for (l, r) in left.iter().zip(right.iter()) {
        let l: i64 = l.parse()?;
        let r: i64 = r.parse()?;
        match l.cmp(&r) {
            Ordering::Equal => continue,
            decided => return Ok(decided),
        }
    }
    Ok(left.len().cmp(&right.len()))
}

/// Classify executors by their version markers.
///
/// Each element is one executor: `None` when it has no version marker,
/// `Some(version)` otherwise (possibly an empty string).
pub fn classify_fleet<S: AsRef<str>>(versions: &[Option<S>], target: Option<&str>) -> DomainClass {
    if versions.is_empty() {
        return DomainClass::Unknown;
    }
    let target = target.map(str::trim).filter(|t| !t.is_empty());

    let mut legacy = 0usize;
    let mut current = 0usize;
    let mut below = 0usize;
    let mut at_or_above = 0usize;
    for version in versions {
        let Some(version) = version else {
            legacy += 1;
            continue;
        };
        current += 1;
        let Some(target) = target else {
            continue;
        };
        let version = version.as_ref().trim();
        match compare_version(version, target) {
            // Blank or non-numeric versions (e.g. dev builds) count as old.
            _ if version.is_empty() => below += 1,
            Ok(Ordering::Less) | Err(_) => below += 1,
            Ok(_) => at_or_above += 1,
        }
    }

    let total = versions.len();
    if legacy == total {
        return DomainClass::Legacy;
    }
    if target.is_some() {
        if below > 0 && at_or_above > 0 {
            return DomainClass::Mixed;
        }
        if below == total {
            return DomainClass::AllBelow;
        }
        if at_or_above == total {
            return DomainClass::AllAboveOrEqual;
        }
        return DomainClass::Unknown;
    }
    if current == total {
        DomainClass::Current
    } else {
        DomainClass::Unknown
    }
}

#[cfg(test)]
#[path = "fleet_tests.rs"]
mod tests;
